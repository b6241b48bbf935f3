//! In-memory store implementation for tests and single-process mode.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{KanbanStore, StoreError, StoreResult};
use crate::models::{
    board::{Board, CreateBoard},
    task::{CreateTask, Task, TaskStatus, UpdateTask},
    user::{CreateUser, User},
};

/// In-memory kanban store.
///
/// Data lives as long as the process. Cloning shares the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryKanbanStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    boards: Arc<RwLock<HashMap<Uuid, Board>>>,
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl MemoryKanbanStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KanbanStore for MemoryKanbanStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == data.username) {
            return Err(StoreError::already_exists("User", data.username));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_board(&self, data: CreateBoard) -> StoreResult<Board> {
        if !self.users.read().await.contains_key(&data.user_id) {
            return Err(StoreError::not_found("User", data.user_id.to_string()));
        }

        let board = Board {
            id: Uuid::new_v4(),
            title: data.title,
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        self.boards.write().await.insert(board.id, board.clone());
        Ok(board)
    }

    async fn get_board(&self, id: Uuid) -> StoreResult<Option<Board>> {
        let boards = self.boards.read().await;
        Ok(boards.get(&id).cloned())
    }

    async fn list_boards_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Board>> {
        let boards = self.boards.read().await;
        let mut result: Vec<Board> = boards
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(result)
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        if !self.boards.read().await.contains_key(&data.board_id) {
            return Err(StoreError::not_found("Board", data.board_id.to_string()));
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            board_id: data.board_id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: Uuid) -> StoreResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn list_tasks_by_board(&self, board_id: Uuid) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut result: Vec<Task> = tasks
            .values()
            .filter(|t| t.board_id == board_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(result)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTask) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(&id).map(|task| {
            task.title = data.title;
            task.description = data.description;
            task.status = data.status;
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(&id).map(|task| {
            task.status = status;
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> StoreResult<bool> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.remove(&id).is_some())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(store: &MemoryKanbanStore, username: &str) -> User {
        store
            .create_user(CreateUser {
                username: username.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_board(store: &MemoryKanbanStore, user_id: Uuid, title: &str) -> Board {
        store
            .create_board(CreateBoard {
                title: title.to_string(),
                user_id,
            })
            .await
            .unwrap()
    }

    fn new_task(board_id: Uuid, title: &str, status: TaskStatus) -> CreateTask {
        CreateTask {
            board_id,
            title: title.to_string(),
            description: String::new(),
            status,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryKanbanStore::new();
        seed_user(&store, "ada").await;

        let err = store
            .create_user(CreateUser {
                username: "ada".to_string(),
                password_hash: "other".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_username_lookup_is_exact() {
        let store = MemoryKanbanStore::new();
        let user = seed_user(&store, "ada").await;

        let found = store.get_user_by_username("ada").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(store.get_user_by_username("ADA").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_boards_listed_per_owner() {
        let store = MemoryKanbanStore::new();
        let ada = seed_user(&store, "ada").await;
        let bob = seed_user(&store, "bob").await;

        let first = seed_board(&store, ada.id, "First").await;
        let second = seed_board(&store, ada.id, "Second").await;
        seed_board(&store, bob.id, "Bob's").await;

        let boards = store.list_boards_by_user(ada.id).await.unwrap();
        let ids: Vec<Uuid> = boards.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.id));
        assert!(ids.contains(&second.id));
    }

    #[tokio::test]
    async fn test_board_requires_existing_owner() {
        let store = MemoryKanbanStore::new();
        let err = store
            .create_board(CreateBoard {
                title: "Orphan".to_string(),
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_task_requires_existing_board() {
        let store = MemoryKanbanStore::new();
        let err = store
            .create_task(new_task(Uuid::new_v4(), "Lost", TaskStatus::Todo))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { entity_type: "Board", .. }));
    }

    #[tokio::test]
    async fn test_status_update_moves_task() {
        let store = MemoryKanbanStore::new();
        let user = seed_user(&store, "ada").await;
        let board = seed_board(&store, user.id, "Work").await;
        let task = store
            .create_task(new_task(board.id, "Write docs", TaskStatus::Todo))
            .await
            .unwrap();

        let moved = store
            .update_task_status(task.id, TaskStatus::Done)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.status, TaskStatus::Done);
        assert_eq!(moved.title, "Write docs");

        let tasks = store.list_tasks_by_board(board.id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Done);
    }

    #[tokio::test]
    async fn test_update_missing_task_returns_none() {
        let store = MemoryKanbanStore::new();
        let updated = store
            .update_task(
                Uuid::new_v4(),
                UpdateTask {
                    title: "x".to_string(),
                    description: String::new(),
                    status: TaskStatus::Todo,
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());

        let moved = store
            .update_task_status(Uuid::new_v4(), TaskStatus::Done)
            .await
            .unwrap();
        assert!(moved.is_none());
    }

    #[tokio::test]
    async fn test_full_update_replaces_fields() {
        let store = MemoryKanbanStore::new();
        let user = seed_user(&store, "ada").await;
        let board = seed_board(&store, user.id, "Work").await;
        let task = store
            .create_task(CreateTask {
                board_id: board.id,
                title: "Draft".to_string(),
                description: "first pass".to_string(),
                status: TaskStatus::Todo,
            })
            .await
            .unwrap();

        let updated = store
            .update_task(
                task.id,
                UpdateTask {
                    title: "Final".to_string(),
                    description: String::new(),
                    status: TaskStatus::InProgress,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, task.id);
        assert_eq!(updated.board_id, board.id);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.description, "");
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert!(updated.updated_at >= task.updated_at);
    }

    #[tokio::test]
    async fn test_delete_is_not_repeatable() {
        let store = MemoryKanbanStore::new();
        let user = seed_user(&store, "ada").await;
        let board = seed_board(&store, user.id, "Work").await;
        let task = store
            .create_task(new_task(board.id, "Temp", TaskStatus::Todo))
            .await
            .unwrap();

        assert!(store.delete_task(task.id).await.unwrap());
        assert!(!store.delete_task(task.id).await.unwrap());
        assert!(store.list_tasks_by_board(board.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tasks_scoped_to_board() {
        let store = MemoryKanbanStore::new();
        let user = seed_user(&store, "ada").await;
        let home = seed_board(&store, user.id, "Home").await;
        let work = seed_board(&store, user.id, "Work").await;

        store
            .create_task(new_task(home.id, "Laundry", TaskStatus::Todo))
            .await
            .unwrap();
        store
            .create_task(new_task(work.id, "Standup", TaskStatus::InProgress))
            .await
            .unwrap();

        let tasks = store.list_tasks_by_board(home.id).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Laundry");
    }
}
