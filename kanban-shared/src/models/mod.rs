/// Database models for the kanban service
///
/// Each model carries its own PostgreSQL queries as associated functions
/// taking a `&PgPool`. The `store` module wraps them behind the
/// `KanbanStore` trait.
///
/// # Models
///
/// - `user`: Accounts with Argon2id password hashes
/// - `board`: Boards, each owned by one user
/// - `task`: Tasks on a board, placed in a status column
///
/// # Example
///
/// ```no_run
/// use kanban_shared::models::board::{Board, CreateBoard};
/// use kanban_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let board = Board::create(&pool, CreateBoard {
///     title: "Roadmap".to_string(),
///     user_id,
/// }).await?;
///
/// let boards = Board::list_by_user(&pool, user_id).await?;
/// assert!(boards.iter().any(|b| b.id == board.id));
/// # Ok(())
/// # }
/// ```

pub mod board;
pub mod task;
pub mod user;
