use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{NewTodo, TodoChanges},
    service::TodoService,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};

/// Lists the authenticated user's todos, oldest first.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Todo` objects (empty when the user has none).
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn list_todos(
    service: web::Data<TodoService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let todos = service.list(&user).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a todo owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, non-empty string.
/// - `detail` (optional): string.
/// - `done` (optional): boolean, defaults to `false`.
///
/// ## Responses:
/// - `201 Created`: the new `Todo`.
/// - `400 Bad Request`: the body is malformed or fails validation.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_todo(
    service: web::Data<TodoService>,
    user: AuthenticatedUser,
    payload: web::Json<NewTodo>,
) -> Result<impl Responder, AppError> {
    let todo = service.create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(todo))
}

/// Retrieves one todo by id.
///
/// ## Responses:
/// - `200 OK`: the `Todo`.
/// - `400 Bad Request`: `id` is not an integer, or does not fit in 32 bits
///   (e.g. `99999999999`).
/// - `404 Not Found`: no such todo for this user. Items owned by others look the same.
#[get("/{id}")]
pub async fn get_todo(
    service: web::Data<TodoService>,
    user: AuthenticatedUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let todo = service.get(&user, todo_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Partially updates a todo. Only `title`, `detail` and `done` present in the body change.
///
/// ## Responses:
/// - `200 OK`: the updated `Todo`.
/// - `400 Bad Request`: `id` not a 32-bit integer, wrong field types, or no field given.
/// - `404 Not Found`: no such todo for this user.
#[patch("/{id}")]
pub async fn update_todo(
    service: web::Data<TodoService>,
    user: AuthenticatedUser,
    todo_id: web::Path<i32>,
    changes: web::Json<TodoChanges>,
) -> Result<impl Responder, AppError> {
    let todo = service
        .update(&user, todo_id.into_inner(), changes.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// Permanently deletes a todo.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `404 Not Found`: no such todo for this user.
#[delete("/{id}")]
pub async fn delete_todo(
    service: web::Data<TodoService>,
    user: AuthenticatedUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    service.remove(&user, todo_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
