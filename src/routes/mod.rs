pub mod auth;
pub mod status;
pub mod todos;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::{json_error_handler, path_error_handler};

/// Registers every route. Callers must provide `web::Data<TodoService>`,
/// `web::Data<dyn UserRepository>` and `web::Data<JwtKeys>` as app data.
///
/// `/status` and `/auth` are public; everything under `/todos` goes through `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(status::status)
        .service(
            web::scope("/auth")
                .service(auth::login)
                .service(auth::register),
        )
        .service(
            web::scope("/todos")
                .wrap(AuthMiddleware)
                .service(todos::list_todos)
                .service(todos::create_todo)
                .service(todos::get_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        );
}
