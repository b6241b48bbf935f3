/// Board endpoints
///
/// All routes sit behind the session middleware.
///
/// # Endpoints
///
/// - `GET /api/boards` - List the caller's boards
/// - `POST /api/boards` - Create a board owned by the caller
/// - `GET /api/boards/:id` - Fetch one board

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    session::SessionUser,
};
use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use kanban_shared::models::board::{Board, CreateBoard};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Create board request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board title, stored exactly as given
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
}

/// Loads a board the caller may see
///
/// With ownership enforcement on, a board owned by someone else is reported
/// as missing so its existence does not leak.
pub(crate) async fn load_board(
    state: &AppState,
    session: &SessionUser,
    board_id: Uuid,
) -> ApiResult<Board> {
    let board = state
        .store
        .get_board(board_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Board not found".to_string()))?;

    if state.config.api.enforce_board_ownership && !board.is_owned_by(session.user_id) {
        tracing::debug!(
            board_id = %board_id,
            user_id = %session.user_id,
            "Board access denied, caller is not the owner"
        );
        return Err(ApiError::NotFound("Board not found".to_string()));
    }

    Ok(board)
}

/// List boards
///
/// ```text
/// GET /api/boards
/// ```
///
/// ```json
/// [{ "_id": "uuid", "title": "Roadmap", "userId": "uuid", "createdAt": "..." }]
/// ```
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> ApiResult<Json<Vec<Board>>> {
    let boards = state.store.list_boards_by_user(session.user_id).await?;
    Ok(Json(boards))
}

/// Create a board
///
/// ```text
/// POST /api/boards
/// Content-Type: application/json
///
/// { "title": "Roadmap" }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Empty or overlong title
pub async fn create_board(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    ApiJson(req): ApiJson<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    req.validate()?;

    let board = state
        .store
        .create_board(CreateBoard {
            title: req.title,
            user_id: session.user_id,
        })
        .await?;

    tracing::info!(board_id = %board.id, user_id = %session.user_id, "Board created");

    Ok((StatusCode::CREATED, Json(board)))
}

/// Fetch a board
///
/// ```text
/// GET /api/boards/:id
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No such board, or not the caller's when ownership is enforced
pub async fn get_board(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
    ApiPath(board_id): ApiPath<Uuid>,
) -> ApiResult<Json<Board>> {
    let board = load_board(&state, &session, board_id).await?;
    Ok(Json(board))
}
