use async_trait::async_trait;
use sqlx::PgPool;

use super::{todo_not_found, TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTodo, Todo, TodoChanges, User, UserRecord};

const TODO_COLUMNS: &str = "id, owner_id, title, detail, done, created_at, updated_at";

/// Postgres-backed todo storage. Ids come from a `SERIAL` sequence, so they are never reused.
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Todo>, AppError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos WHERE owner_id = $1 ORDER BY id ASC",
            TODO_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn find_one(&self, id: i32, owner_id: i32) -> Result<Todo, AppError> {
        sqlx::query_as::<_, Todo>(&format!(
            "SELECT {} FROM todos WHERE id = $1 AND owner_id = $2",
            TODO_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(todo_not_found)
    }

    async fn create(&self, payload: &NewTodo, owner_id: i32) -> Result<Todo, AppError> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (owner_id, title, detail, done)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(owner_id)
        .bind(&payload.title)
        .bind(&payload.detail)
        .bind(payload.done.unwrap_or(false))
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn update(
        &self,
        id: i32,
        changes: &TodoChanges,
        owner_id: i32,
    ) -> Result<Todo, AppError> {
        // One statement, so the merge is atomic for the row.
        sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos
             SET title = COALESCE($1, title),
                 detail = COALESCE($2, detail),
                 done = COALESCE($3, done),
                 updated_at = NOW()
             WHERE id = $4 AND owner_id = $5
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(&changes.title)
        .bind(&changes.detail)
        .bind(changes.done)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(todo_not_found)
    }

    async fn remove(&self, id: i32, owner_id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(todo_not_found());
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2)
             ON CONFLICT (email) DO NOTHING
             RETURNING id, email, created_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        inserted.ok_or_else(|| AppError::BadRequest("Email already registered".into()))
    }
}
