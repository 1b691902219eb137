//! SQLite task store
//!
//! Uses SQLx with a connection pool; schema is applied through the
//! bundled migrations directory.

use std::path::Path;

use chrono::Utc;
use sqlx::{Pool, Sqlite, SqlitePool};
use thiserror::Error;

use super::models::{NewTask, Task, TaskChanges};

/// Task store failure kinds
///
/// The HTTP layer matches on these to pick a status code; the messages
/// are user-visible and rendered verbatim in the error body.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed input (blank title, etc.)
    #[error("{0}")]
    Validation(String),

    /// No task with the requested id
    #[error("{0}")]
    Missing(String),

    /// SQLite failure; never shown to clients
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn missing_task() -> StoreError {
    StoreError::Missing("tarefa não encontrada".to_string())
}

fn blank_title() -> StoreError {
    StoreError::Validation("título obrigatório".to_string())
}

/// SQLite-backed task store
pub struct TaskStore {
    pool: Pool<Sqlite>,
}

impl TaskStore {
    /// Open (or create) the task database and run migrations
    pub async fn connect(path: &Path) -> Result<Self, StoreError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Database(sqlx::Error::Io(e)))?;
        }

        let connection_string = format!("sqlite:{}?mode=rwc", path.display());
        let pool = SqlitePool::connect(&connection_string).await?;

        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            tracing::error!(error = %e, "Migration failed");
            StoreError::Database(sqlx::Error::Migrate(Box::new(e)))
        })?;

        Ok(Self { pool })
    }

    /// List all tasks, oldest first
    pub async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, titulo, descricao, completa, created_at, updated_at
             FROM tarefas ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Fetch a single task by id
    pub async fn get(&self, id: i64) -> Result<Task, StoreError> {
        sqlx::query_as::<_, Task>(
            "SELECT id, titulo, descricao, completa, created_at, updated_at
             FROM tarefas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(missing_task)
    }

    /// Insert a new task and return the stored row
    pub async fn create(&self, new_task: NewTask) -> Result<Task, StoreError> {
        if new_task.titulo.trim().is_empty() {
            return Err(blank_title());
        }

        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO tarefas (titulo, descricao, completa, created_at, updated_at)
             VALUES (?, ?, 0, ?, ?)",
        )
        .bind(&new_task.titulo)
        .bind(&new_task.descricao)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Apply a partial update and return the stored row
    ///
    /// Read-modify-write runs inside one transaction so concurrent
    /// partial updates cannot drop each other's fields.
    pub async fn update(&self, id: i64, changes: TaskChanges) -> Result<Task, StoreError> {
        if changes
            .titulo
            .as_deref()
            .is_some_and(|titulo| titulo.trim().is_empty())
        {
            return Err(blank_title());
        }

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Task>(
            "SELECT id, titulo, descricao, completa, created_at, updated_at
             FROM tarefas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(missing_task)?;

        let titulo = changes.titulo.unwrap_or(current.titulo);
        let descricao = changes.descricao.unwrap_or(current.descricao);
        let completa = changes.completa.unwrap_or(current.completa);
        let now = Utc::now();

        sqlx::query(
            "UPDATE tarefas SET titulo = ?, descricao = ?, completa = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&titulo)
        .bind(&descricao)
        .bind(completa)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query_as::<_, Task>(
            "SELECT id, titulo, descricao, completa, created_at, updated_at
             FROM tarefas WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Delete a task and return the removed row
    pub async fn delete(&self, id: i64) -> Result<Task, StoreError> {
        let mut tx = self.pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(
            "SELECT id, titulo, descricao, completa, created_at, updated_at
             FROM tarefas WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(missing_task)?;

        sqlx::query("DELETE FROM tarefas WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(task)
    }
}
