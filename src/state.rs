use std::sync::Arc;

use actix_web::web;
use sqlx::PgPool;

use crate::auth::JwtKeys;
use crate::repository::{
    MemoryStore, PgTodoRepository, PgUserRepository, TodoRepository, UserRepository,
};
use crate::routes;
use crate::service::TodoService;

/// Everything the handlers pull out of app data, built once and cloned into each worker.
#[derive(Clone)]
pub struct AppState {
    pub todos: web::Data<TodoService>,
    pub users: web::Data<dyn UserRepository>,
    pub keys: web::Data<JwtKeys>,
}

impl AppState {
    pub fn new(
        todos: Arc<dyn TodoRepository>,
        users: Arc<dyn UserRepository>,
        keys: JwtKeys,
    ) -> Self {
        Self {
            todos: web::Data::new(TodoService::new(todos)),
            users: web::Data::from(users),
            keys: web::Data::new(keys),
        }
    }

    pub fn postgres(pool: PgPool, keys: JwtKeys) -> Self {
        Self::new(
            Arc::new(PgTodoRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            keys,
        )
    }

    /// Users and todos share one `MemoryStore`; nothing survives a restart.
    pub fn in_memory(keys: JwtKeys) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, keys)
    }

    /// Installs the app data and all routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.todos.clone())
            .app_data(self.users.clone())
            .app_data(self.keys.clone());
        routes::config(cfg);
    }
}
