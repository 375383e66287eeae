use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{todo_not_found, TodoRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewTodo, Todo, TodoChanges, User, UserRecord};

/// In-process store for users and todos.
///
/// Used when no database is configured and by the test suites. Ids come from counters
/// that only ever increase, matching the never-reused guarantee of the Postgres sequences.
/// Items are kept in a `BTreeMap` keyed by id, so listing returns insertion order.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    todos: BTreeMap<i32, Todo>,
    last_user_id: i32,
    last_todo_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::DatabaseError("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<Todo>, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .todos
            .values()
            .filter(|todo| todo.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: i32, owner_id: i32) -> Result<Todo, AppError> {
        let inner = self.lock()?;
        inner
            .todos
            .get(&id)
            .filter(|todo| todo.owner_id == owner_id)
            .cloned()
            .ok_or_else(todo_not_found)
    }

    async fn create(&self, payload: &NewTodo, owner_id: i32) -> Result<Todo, AppError> {
        let mut inner = self.lock()?;
        inner.last_todo_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: inner.last_todo_id,
            owner_id,
            title: payload.title.clone(),
            detail: payload.detail.clone(),
            done: payload.done.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(
        &self,
        id: i32,
        changes: &TodoChanges,
        owner_id: i32,
    ) -> Result<Todo, AppError> {
        let mut inner = self.lock()?;
        let todo = inner
            .todos
            .get_mut(&id)
            .filter(|todo| todo.owner_id == owner_id)
            .ok_or_else(todo_not_found)?;
        todo.apply(changes);
        Ok(todo.clone())
    }

    async fn remove(&self, id: i32, owner_id: i32) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        let owned = inner
            .todos
            .get(&id)
            .map_or(false, |todo| todo.owner_id == owner_id);
        if !owned {
            return Err(todo_not_found());
        }
        inner.todos.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|user| user.email == email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|user| user.email == email) {
            return Err(AppError::BadRequest("Email already registered".into()));
        }
        inner.last_user_id += 1;
        let record = UserRecord {
            id: inner.last_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(record.clone());
        Ok(User::from(record))
    }
}
