/// Board model and database operations
///
/// A board is a named collection of tasks owned by exactly one user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(200) NOT NULL,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique board ID, serialized as `_id`
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Board title, stored exactly as supplied
    pub title: String,

    /// Owning user
    pub user_id: Uuid,

    /// When the board was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new board
#[derive(Debug, Clone)]
pub struct CreateBoard {
    pub title: String,
    pub user_id: Uuid,
}

impl Board {
    /// Returns true if `user_id` owns this board
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Inserts a new board
    pub async fn create(pool: &PgPool, data: CreateBoard) -> Result<Self, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (title, user_id)
            VALUES ($1, $2)
            RETURNING id, title, user_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(board)
    }

    /// Finds a board by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, user_id, created_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Lists every board owned by a user, oldest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, user_id, created_at
            FROM boards
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(boards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owned_by() {
        let owner = Uuid::new_v4();
        let board = Board {
            id: Uuid::new_v4(),
            title: "Sprint 12".to_string(),
            user_id: owner,
            created_at: Utc::now(),
        };

        assert!(board.is_owned_by(owner));
        assert!(!board.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_board_serializes_camel_case() {
        let board = Board {
            id: Uuid::new_v4(),
            title: "Home".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["title"], "Home");
        assert_eq!(json["userId"], board.user_id.to_string());
        assert_eq!(json["_id"], board.id.to_string());
        assert!(json.get("id").is_none());
    }
}
