//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs issued by the `/auth` routes. `AuthMiddleware` verifies them on
//! protected scopes and `AuthenticatedUser` hands the resolved identity to handlers.

pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, JwtKeys};

/// Response body after a successful registration or login.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The JWT to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// The identifier of the authenticated user.
    pub user_id: i32,
}
