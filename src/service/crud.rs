//! User CRUD against SQLite. Every call is a single statement on a pooled connection.

use crate::error::AppError;
use crate::model::{User, UserInput};
use crate::store::USERS_TABLE;
use chrono::Utc;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, name, email, age, created_at";

pub struct UserService;

impl UserService {
    /// Insert one row. Returns it with its assigned id and creation time.
    pub async fn create(pool: &SqlitePool, input: &UserInput) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO {USERS_TABLE} (name, email, age, created_at) VALUES (?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.age)
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;
        tracing::info!(id = user.id, name = %user.name, "created user");
        Ok(user)
    }

    /// Fetch one row by id.
    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM {USERS_TABLE} WHERE id = ?");
        tracing::debug!(sql = %sql, id, "query");
        let user = sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(pool).await?;
        Ok(user)
    }

    /// All rows in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM {USERS_TABLE} ORDER BY id ASC");
        tracing::debug!(sql = %sql, "query");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
        Ok(users)
    }

    /// Replace name, email and age of one row. `None` when the id does not exist.
    pub async fn update(pool: &SqlitePool, id: i64, input: &UserInput) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE {USERS_TABLE} SET name = ?, email = ?, age = ? WHERE id = ? RETURNING {USER_COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.age)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        if let Some(u) = &user {
            tracing::info!(id = u.id, name = %u.name, "updated user");
        }
        Ok(user)
    }

    /// Delete one row by id. Returns false when nothing was deleted.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {USERS_TABLE} WHERE id = ?");
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(id, "deleted user");
        }
        Ok(deleted)
    }
}
