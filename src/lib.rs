#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "A multi-user todo list backend: users authenticate with a bearer JWT and manage"]
#![doc = "their own private todo items. Every read and write is scoped to the caller's"]
#![doc = "identity. The binary (`main.rs`) only loads configuration and starts the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::AppError;
pub use state::AppState;
