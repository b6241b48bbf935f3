/// Authentication endpoints
///
/// Registration and login start a server-side session and hand its token to
/// the browser in an `HttpOnly` cookie. Logout destroys it.
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Create an account and log in
/// - `POST /api/auth/login` - Log in
/// - `POST /api/auth/logout` - Log out (always succeeds)
/// - `GET /api/auth/check` - Report whether the request has a valid session

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
    session::{removal_cookie, resolve_session, session_cookie, session_token},
};
use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use kanban_shared::{
    auth::password,
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Credentials for register and login
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Login name
    #[validate(length(min = 1, max = 64, message = "Username must be 1 to 64 characters"))]
    pub username: String,

    /// Plaintext password; no strength policy is applied
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response for register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Human-readable outcome
    pub message: String,

    /// The authenticated user, without the password hash
    pub user: User,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Session check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub logged_in: bool,
}

/// Starts a session for `user_id`, replacing any session the request
/// already carried
async fn start_session(state: &AppState, jar: CookieJar, user_id: Uuid) -> ApiResult<CookieJar> {
    if let Some(previous) = session_token(&jar, &state.config.session) {
        state.sessions.destroy(&previous).await?;
    }

    let token = state.sessions.create(user_id).await?;
    Ok(jar.add(session_cookie(&state.config.session, token)))
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// { "username": "ada", "password": "hunter2" }
/// ```
///
/// # Response
///
/// `201 Created` with a `Set-Cookie` session header:
///
/// ```json
/// {
///   "message": "User created successfully",
///   "user": { "_id": "uuid", "username": "ada", "createdAt": "..." }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Username already exists
/// - `422 Unprocessable Entity`: Missing username or password
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    req.validate()?;

    // Check before hashing; the store's unique constraint catches races
    if state.store.get_user_by_username(&req.username).await?.is_some() {
        tracing::debug!(username = %req.username, "Registration rejected, username taken");
        return Err(ApiError::duplicate_user());
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = state
        .store
        .create_user(CreateUser {
            username: req.username,
            password_hash,
        })
        .await?;

    let jar = start_session(&state, jar, user.id).await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// Log in
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// { "username": "ada", "password": "hunter2" }
/// ```
///
/// # Response
///
/// `200 OK` with a `Set-Cookie` session header:
///
/// ```json
/// {
///   "message": "Logged in successfully",
///   "user": { "_id": "uuid", "username": "ada", "createdAt": "..." }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Unknown username or wrong password
/// - `422 Unprocessable Entity`: Missing username or password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    req.validate()?;

    let Some(user) = state.store.get_user_by_username(&req.username).await? else {
        password::verify_against_dummy(&req.password);
        tracing::debug!("Login rejected, unknown username");
        return Err(ApiError::invalid_credentials());
    };

    if !password::verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = %user.id, "Login rejected, wrong password");
        return Err(ApiError::invalid_credentials());
    }

    let jar = start_session(&state, jar, user.id).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        jar,
        Json(AuthResponse {
            message: "Logged in successfully".to_string(),
            user,
        }),
    ))
}

/// Log out
///
/// Destroys the session if there is one and clears the cookie. Calling it
/// without a session still returns `200 OK`.
///
/// ```text
/// POST /api/auth/logout
/// ```
///
/// ```json
/// { "message": "Logged out successfully" }
/// ```
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    if let Some(token) = session_token(&jar, &state.config.session) {
        state.sessions.destroy(&token).await?;
    }

    Ok((
        jar.remove(removal_cookie(&state.config.session)),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

/// Session check
///
/// ```text
/// GET /api/auth/check
/// ```
///
/// ```json
/// { "loggedIn": true }
/// ```
pub async fn check(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Json<CheckResponse>> {
    let session = resolve_session(&state, &jar).await?;

    Ok(Json(CheckResponse {
        logged_in: session.is_some(),
    }))
}
