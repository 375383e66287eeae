use crate::{
    auth::{hash_password, verify_password, AuthResponse, JwtKeys},
    error::AppError,
    models::{Credentials, User},
    repository::UserRepository,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new account and returns an authentication token.
#[post("/register")]
pub async fn register(
    users: web::Data<dyn UserRepository>,
    keys: web::Data<JwtKeys>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let password_hash = hash_password(&credentials.password)?;
    let user = users.create(&credentials.email, &password_hash).await?;
    log::info!("registered user {}", user.id);

    let token = keys.generate_token(&user)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}

/// Login user
///
/// Exchanges an email and password for an authentication token.
#[post("/login")]
pub async fn login(
    users: web::Data<dyn UserRepository>,
    keys: web::Data<JwtKeys>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let record = match users.find_by_email(&credentials.email).await? {
        Some(record) => record,
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };

    if !verify_password(&credentials.password, &record.password_hash)? {
        log::warn!("failed login for user {}", record.id);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let user = User::from(record);
    let token = keys.generate_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}
