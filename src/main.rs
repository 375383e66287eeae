use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;

use todo_api::auth::JwtKeys;
use todo_api::config::Config;
use todo_api::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let keys = JwtKeys::new(&config.jwt_secret, config.jwt_expiration_hours);

    let state = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            AppState::postgres(pool, keys)
        }
        None => {
            log::warn!("DATABASE_URL is not set; using the in-memory store");
            AppState::in_memory(keys)
        }
    };

    log::info!("Starting todo-api server at {}", config.server_url());
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
