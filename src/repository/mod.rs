//! Persistence seams.
//!
//! Every `TodoRepository` method takes the owner's id as a mandatory argument. There is no
//! unscoped lookup, so a query that forgets the ownership filter cannot be written against
//! this trait.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTodo, Todo, TodoChanges, User, UserRecord};

pub use memory::MemoryStore;
pub use postgres::{PgTodoRepository, PgUserRepository};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All items of `owner_id`, oldest first.
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Todo>, AppError>;

    /// `NotFound` both when `id` does not exist and when it belongs to someone else.
    async fn find_one(&self, id: i32, owner_id: i32) -> Result<Todo, AppError>;

    async fn create(&self, payload: &NewTodo, owner_id: i32) -> Result<Todo, AppError>;

    /// Applies only the fields present in `changes`; the owner is never rewritten.
    async fn update(&self, id: i32, changes: &TodoChanges, owner_id: i32)
        -> Result<Todo, AppError>;

    async fn remove(&self, id: i32, owner_id: i32) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    /// `BadRequest` if the email is already registered.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError>;
}

pub(crate) fn todo_not_found() -> AppError {
    AppError::NotFound("Todo not found".into())
}
