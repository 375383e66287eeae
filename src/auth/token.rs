use crate::error::AppError;
use crate::models::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
    /// Email of the user at the time the token was issued.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Longest token lifetime accepted, in hours (one year).
pub const MAX_LIFETIME_HOURS: i64 = 24 * 365;

/// Signing and verification keys for HS256 tokens, shared as app data.
///
/// Built once from the configured secret so the hot path never touches the environment.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: chrono::Duration,
}

impl JwtKeys {
    /// `lifetime_hours` is clamped to `1..=MAX_LIFETIME_HOURS`.
    pub fn new(secret: &str, lifetime_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: chrono::Duration::hours(lifetime_hours.clamp(1, MAX_LIFETIME_HOURS)),
        }
    }

    /// Issues a token for `user`, valid for the configured lifetime.
    ///
    /// # Returns
    /// The encoded JWT, or `AppError::InternalServerError` if encoding fails.
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::InternalServerError("Token lifetime overflows".into()))?;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a JWT string and decodes its claims.
    ///
    /// Signature and expiration are checked with the default HS256 validation.
    ///
    /// # Returns
    /// The decoded `Claims`, or `AppError::Unauthorized` if the token is malformed,
    /// its signature is invalid, or it has expired.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}
