//! Ownership-scoped todo operations.
//!
//! Each method takes the caller's [`AuthenticatedUser`] and uses its id as the owner scope
//! for the repository call. Payloads are validated before the store is touched.

use std::sync::Arc;

use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{NewTodo, Todo, TodoChanges};
use crate::repository::TodoRepository;

#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<Todo>, AppError> {
        let todos = self.repo.list_by_owner(user.id).await?;
        log::debug!("listed {} todos for user {}", todos.len(), user.id);
        Ok(todos)
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: i32) -> Result<Todo, AppError> {
        self.repo.find_one(id, user.id).await
    }

    pub async fn create(&self, user: &AuthenticatedUser, payload: NewTodo) -> Result<Todo, AppError> {
        payload.validate()?;

        let todo = self.repo.create(&payload, user.id).await?;
        log::debug!("user {} created todo {}", user.id, todo.id);
        Ok(todo)
    }

    /// Partial update: fields absent from `changes` keep their current value.
    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: i32,
        changes: TodoChanges,
    ) -> Result<Todo, AppError> {
        changes.validate()?;

        let todo = self.repo.update(id, &changes, user.id).await?;
        log::debug!("user {} updated todo {} (done = {})", user.id, id, todo.done);
        Ok(todo)
    }

    pub async fn remove(&self, user: &AuthenticatedUser, id: i32) -> Result<(), AppError> {
        self.repo.remove(id, user.id).await?;
        log::debug!("user {} deleted todo {}", user.id, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTodoRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn caller() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            email: "owner@example.com".to_string(),
        }
    }

    fn stored(id: i32, title: &str, done: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id,
            owner_id: 1,
            title: title.to_string(),
            detail: None,
            done,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_rt::test]
    async fn test_create_scopes_to_caller() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create()
            .withf(|payload, owner_id| payload.title == "Buy milk" && *owner_id == 1)
            .times(1)
            .returning(|payload, _| Ok(stored(1, &payload.title, payload.done.unwrap_or(false))));

        let service = TodoService::new(Arc::new(repo));
        let todo = service
            .create(
                &caller(),
                NewTodo {
                    title: "Buy milk".to_string(),
                    detail: None,
                    done: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.detail, None);
        assert!(!todo.done);
    }

    #[actix_rt::test]
    async fn test_create_with_empty_title_never_reaches_store() {
        let mut repo = MockTodoRepository::new();
        repo.expect_create().never();

        let service = TodoService::new(Arc::new(repo));
        let result = service
            .create(
                &caller(),
                NewTodo {
                    title: "".to_string(),
                    detail: Some("x".to_string()),
                    done: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_empty_update_never_reaches_store() {
        let mut repo = MockTodoRepository::new();
        repo.expect_update().never();

        let service = TodoService::new(Arc::new(repo));
        let result = service.update(&caller(), 1, TodoChanges::default()).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_update_passes_only_present_fields() {
        let mut repo = MockTodoRepository::new();
        repo.expect_update()
            .withf(|id, changes, owner_id| {
                *id == 4
                    && *owner_id == 1
                    && changes.done == Some(true)
                    && changes.title.is_none()
                    && changes.detail.is_none()
            })
            .times(1)
            .returning(|id, _, _| Ok(stored(id, "unchanged", true)));

        let service = TodoService::new(Arc::new(repo));
        let todo = service
            .update(
                &caller(),
                4,
                TodoChanges {
                    done: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(todo.done);
        assert_eq!(todo.title, "unchanged");
    }

    #[actix_rt::test]
    async fn test_not_found_propagates_unchanged() {
        let mut repo = MockTodoRepository::new();
        repo.expect_find_one()
            .with(eq(9), eq(1))
            .returning(|_, _| Err(AppError::NotFound("Todo not found".into())));
        repo.expect_remove()
            .with(eq(9), eq(1))
            .returning(|_, _| Err(AppError::NotFound("Todo not found".into())));

        let service = TodoService::new(Arc::new(repo));

        assert!(matches!(
            service.get(&caller(), 9).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.remove(&caller(), 9).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_list_uses_caller_as_owner() {
        let mut repo = MockTodoRepository::new();
        repo.expect_list_by_owner()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(vec![stored(1, "a", false), stored(2, "b", true)]));

        let service = TodoService::new(Arc::new(repo));
        let todos = service.list(&caller()).await.unwrap();

        assert_eq!(todos.len(), 2);
    }

    #[actix_rt::test]
    async fn test_storage_failure_surfaces() {
        let mut repo = MockTodoRepository::new();
        repo.expect_list_by_owner()
            .returning(|_| Err(AppError::DatabaseError("connection refused".into())));

        let service = TodoService::new(Arc::new(repo));

        assert!(matches!(
            service.list(&caller()).await,
            Err(AppError::DatabaseError(_))
        ));
    }
}
