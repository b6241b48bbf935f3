//! Persistence abstraction for users, boards and tasks.
//!
//! Handlers depend on [`KanbanStore`] rather than on a concrete database so
//! the API can run against PostgreSQL in production and an in-memory map in
//! tests or single-process mode.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    board::{Board, CreateBoard},
    task::{CreateTask, Task, TaskStatus, UpdateTask},
    user::{CreateUser, User},
};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryKanbanStore;
pub use postgres::PgKanbanStore;

/// Storage operations needed by the kanban API.
///
/// Lookups return `Ok(None)` for missing records; mutations of a single
/// task return `Ok(None)` / `Ok(false)` when the task is gone. Callers turn
/// those into 404s.
#[async_trait]
pub trait KanbanStore: Send + Sync {
    // =========================================================================
    // Users
    // =========================================================================

    /// Creates a user. Fails with [`StoreError::AlreadyExists`] if the
    /// username is taken.
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    /// Gets a user by exact username.
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    // =========================================================================
    // Boards
    // =========================================================================

    /// Creates a board.
    async fn create_board(&self, data: CreateBoard) -> StoreResult<Board>;

    /// Gets a board by ID.
    async fn get_board(&self, id: Uuid) -> StoreResult<Option<Board>>;

    /// Lists the boards owned by a user, oldest first.
    async fn list_boards_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>>;

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Creates a task. Fails with [`StoreError::NotFound`] if the board does
    /// not exist.
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Gets a task by ID.
    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// Lists the tasks on a board, oldest first.
    async fn list_tasks_by_board(&self, board_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Replaces a task's editable fields.
    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>>;

    /// Moves a task to another column.
    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>>;

    /// Deletes a task. Returns false if it did not exist.
    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;

    // =========================================================================
    // Health
    // =========================================================================

    /// Verifies the backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}
