//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a request can hit (a bad credential, a malformed payload, an item
//! outside the caller's ownership scope, an unreachable store) is one of its variants.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return it
//! directly; each variant becomes a status code and a structured JSON body of the form
//! `{"error": "<kind>", "message": "<detail>"}`.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors` and
//! `jsonwebtoken::errors::Error` allow the `?` operator to be used everywhere.
//! Password hashing failures are mapped by hand in `auth::password`.

use actix_web::{
    error::{JsonPayloadError, PathError, ResponseError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The credential is missing, malformed, badly signed or expired (HTTP 401).
    Unauthorized(String),
    /// A well-formed request that cannot be honoured, e.g. a duplicate registration (HTTP 400).
    BadRequest(String),
    /// The item does not exist within the caller's ownership scope (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error such as missing configuration (HTTP 500).
    InternalServerError(String),
    /// The store is unreachable or rejected a statement (HTTP 500).
    /// The detail is logged but never sent to the client.
    DatabaseError(String),
    /// The input failed schema validation (HTTP 400).
    ValidationError(String),
}

impl AppError {
    /// Short machine-readable name used in the `error` field of the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => "unauthenticated",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound(_) => "not_found",
            AppError::InternalServerError(_) => "internal_error",
            AppError::DatabaseError(_) => "storage_failure",
            AppError::ValidationError(_) => "validation_error",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::DatabaseError(detail) => {
                log::error!("storage failure: {}", detail);
                "Storage is unavailable"
            }
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg)
            | AppError::ValidationError(msg) => msg.as_str(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind(),
            "message": message
        }))
    }
}

/// `RowNotFound` means the scoped lookup matched nothing; everything else is a storage failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Todo not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Error handler for `web::JsonConfig`: a body that does not deserialize is a validation failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

/// Error handler for `web::PathConfig`: a non-numeric item id never reaches the service.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid path parameter: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Email already registered".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::ValidationError("title: length".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Todo not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::DatabaseError("connection refused".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_storage_failure_detail_is_not_leaked() {
        let error = AppError::DatabaseError("password authentication failed for user".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "storage_failure");
        assert_eq!(json["message"], "Storage is unavailable");
    }

    #[actix_rt::test]
    async fn test_error_body_is_structured() {
        let error = AppError::NotFound("Todo not found".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "not_found");
        assert_eq!(json["message"], "Todo not found");
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(sqlx::Error::PoolTimedOut),
            AppError::DatabaseError(_)
        ));
    }
}
