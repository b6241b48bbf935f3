/// Cookie session plumbing
///
/// The session cookie carries an opaque token; the `SessionStore` in
/// application state maps it to a user id. This module reads and writes the
/// cookie and provides the middleware that gates board and task routes.

use crate::{app::AppState, config::SessionConfig, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

/// Authenticated caller, inserted into request extensions by
/// [`require_session`]
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// User the session belongs to
    pub user_id: Uuid,

    /// Raw session token from the cookie
    pub token: String,
}

/// Returns the session token carried by the request, if any
pub fn session_token(jar: &CookieJar, config: &SessionConfig) -> Option<String> {
    jar.get(&config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Builds the cookie that hands `token` to the browser
pub fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}

/// Builds a cookie that tells the browser to drop the session cookie
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), "")).path("/").build()
}

/// Resolves the request's session to a user, if valid
pub async fn resolve_session(
    state: &AppState,
    jar: &CookieJar,
) -> Result<Option<SessionUser>, ApiError> {
    let Some(token) = session_token(jar, &state.config.session) else {
        return Ok(None);
    };

    let user_id = state.sessions.get(&token).await?;
    Ok(user_id.map(|user_id| SessionUser { user_id, token }))
}

/// Session middleware layer
///
/// Rejects requests without a valid session with 401 and injects
/// [`SessionUser`] into request extensions otherwise.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());

    let session = resolve_session(&state, &jar)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;

    tracing::debug!(user_id = %session.user_id, "Session authenticated");
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::{header, HeaderMap, HeaderValue};

    #[test]
    fn test_session_cookie_attributes() {
        let config = Config::default().session;
        let cookie = session_cookie(&config, "abc123".to_string());

        assert_eq!(cookie.name(), "kanban.sid");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_session_token_from_headers() {
        let config = Config::default().session;
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; kanban.sid=tok42"),
        );

        let jar = CookieJar::from_headers(&headers);
        assert_eq!(session_token(&jar, &config), Some("tok42".to_string()));
    }

    #[test]
    fn test_empty_cookie_is_no_session() {
        let config = Config::default().session;
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("kanban.sid="));

        let jar = CookieJar::from_headers(&headers);
        assert_eq!(session_token(&jar, &config), None);
    }
}
