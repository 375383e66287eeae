use std::env;
use std::io;

use crate::auth::token::MAX_LIFETIME_HOURS;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Runtime settings, read from the environment (and a `.env` file, if `main` loaded one).
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When unset the server runs on the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| invalid("JWT_SECRET must be set"))?;

        let jwt_expiration_hours = parse_var("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)?;
        if !(1..=MAX_LIFETIME_HOURS).contains(&jwt_expiration_hours) {
            return Err(invalid(&format!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}",
                MAX_LIFETIME_HOURS
            )));
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            jwt_expiration_hours,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> io::Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| invalid(&format!("{} must be a number", name))),
        Err(_) => Ok(default),
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg.to_string())
}
