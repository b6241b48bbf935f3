//! PostgreSQL store backed by the model queries.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{KanbanStore, StoreError, StoreResult};
use crate::db::pool;
use crate::models::{
    board::{Board, CreateBoard},
    task::{CreateTask, Task, TaskStatus, UpdateTask},
    user::{CreateUser, User},
};

/// PostgreSQL kanban store.
#[derive(Debug, Clone)]
pub struct PgKanbanStore {
    pool: PgPool,
}

impl PgKanbanStore {
    /// Wraps an existing pool. Migrations must already be applied.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps constraint violations onto the store taxonomy.
fn map_constraint(err: sqlx::Error, entity_type: &'static str, key: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::already_exists(entity_type, key);
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::not_found(entity_type, key);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl KanbanStore for PgKanbanStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let username = data.username.clone();
        User::create(&self.pool, data)
            .await
            .map_err(|e| map_constraint(e, "User", &username))
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_username(&self.pool, username).await?)
    }

    async fn create_board(&self, data: CreateBoard) -> StoreResult<Board> {
        let user_id = data.user_id;
        Board::create(&self.pool, data)
            .await
            .map_err(|e| map_constraint(e, "User", &user_id.to_string()))
    }

    async fn get_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(Board::find_by_id(&self.pool, id).await?)
    }

    async fn list_boards_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        Ok(Board::list_by_user(&self.pool, user_id).await?)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let board_id = data.board_id;
        Task::create(&self.pool, data)
            .await
            .map_err(|e| map_constraint(e, "Board", &board_id.to_string()))
    }

    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        Ok(Task::find_by_id(&self.pool, id).await?)
    }

    async fn list_tasks_by_board(&self, board_id: Uuid) -> StoreResult<Vec<Task>> {
        Ok(Task::list_by_board(&self.pool, board_id).await?)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        Ok(Task::update(&self.pool, id, data).await?)
    }

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>> {
        Ok(Task::update_status(&self.pool, id, status).await?)
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        Ok(Task::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
