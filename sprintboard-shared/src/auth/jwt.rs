//! Session tokens.
//!
//! Sessions are HS256-signed JWTs. The claims carry the user's id, email,
//! and role so authorization checks downstream never need an extra user
//! lookup. Two token types exist: short-lived access tokens (24 hours) for
//! request authentication and long-lived refresh tokens (30 days) that can
//! be exchanged for new access tokens.
//!
//! # Example
//!
//! ```
//! use sprintboard_shared::auth::jwt::{create_token, validate_token, Claims, TokenType};
//! use sprintboard_shared::models::role::Role;
//! use uuid::Uuid;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let claims = Claims::new(Uuid::new_v4(), "a@b.c".into(), Role::Member, TokenType::Access);
//! let token = create_token(&claims, "secret-key-that-is-32-bytes-long!")?;
//!
//! let validated = validate_token(&token, "secret-key-that-is-32-bytes-long!")?;
//! assert_eq!(validated.sub, claims.sub);
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::Role;

/// Token issuer claim value
const ISSUER: &str = "sprintboard";

/// Error type for session-token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,
}

/// Token type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token (24 hours), used for request authentication
    Access,

    /// Refresh token (30 days), exchanged for new access tokens
    Refresh,
}

impl TokenType {
    /// Default expiration duration for this token type
    pub fn default_expiration(&self) -> Duration {
        match self {
            TokenType::Access => Duration::hours(24),
            TokenType::Refresh => Duration::days(30),
        }
    }
}

/// Session-token claims
///
/// `sub` is the user id; `email` and `role` ride along so handlers can
/// authorize without re-reading the user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID
    pub sub: Uuid,

    /// User's email address
    pub email: String,

    /// User's account role
    pub role: Role,

    /// Issuer, always "sprintboard"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Token type
    pub token_type: TokenType,
}

impl Claims {
    /// Creates claims with the default expiration for the token type
    pub fn new(user_id: Uuid, email: String, role: Role, token_type: TokenType) -> Self {
        Self::with_expiration(user_id, email, role, token_type, token_type.default_expiration())
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(
        user_id: Uuid,
        email: String,
        role: Role,
        token_type: TokenType,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            email,
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            token_type,
        }
    }

    /// Whether the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a JWT with HS256
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token's signature, expiry, nbf, and issuer
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

/// Validates a token and requires it to be an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != TokenType::Access {
        return Err(JwtError::ValidationError(
            "Expected access token, got refresh token".to_string(),
        ));
    }

    Ok(claims)
}

/// Validates a token and requires it to be a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != TokenType::Refresh {
        return Err(JwtError::ValidationError(
            "Expected refresh token, got access token".to_string(),
        ));
    }

    Ok(claims)
}

/// Exchanges a valid refresh token for a new access token
///
/// The new token carries the same user id, email, and role.
pub fn refresh_access_token(refresh_token: &str, secret: &str) -> Result<String, JwtError> {
    let refresh_claims = validate_refresh_token(refresh_token, secret)?;

    let access_claims = Claims::new(
        refresh_claims.sub,
        refresh_claims.email,
        refresh_claims.role,
        TokenType::Access,
    );

    create_token(&access_claims, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn access_claims() -> Claims {
        Claims::new(
            Uuid::new_v4(),
            "user@example.com".to_string(),
            Role::Manager,
            TokenType::Access,
        )
    }

    #[test]
    fn test_token_type_expiration() {
        assert_eq!(TokenType::Access.default_expiration(), Duration::hours(24));
        assert_eq!(TokenType::Refresh.default_expiration(), Duration::days(30));
    }

    #[test]
    fn test_claims_creation() {
        let claims = access_claims();

        assert_eq!(claims.iss, "sprintboard");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = access_claims();
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, claims.sub);
        assert_eq!(validated.email, claims.email);
        assert_eq!(validated.role, Role::Manager);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = create_token(&access_claims(), SECRET).unwrap();
        assert!(validate_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let claims = Claims::with_expiration(
            Uuid::new_v4(),
            "user@example.com".to_string(),
            Role::Member,
            TokenType::Access,
            Duration::seconds(-3600),
        );

        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_type_checks() {
        let access = create_token(&access_claims(), SECRET).unwrap();
        let refresh_claims = Claims::new(
            Uuid::new_v4(),
            "user@example.com".to_string(),
            Role::Member,
            TokenType::Refresh,
        );
        let refresh = create_token(&refresh_claims, SECRET).unwrap();

        assert!(validate_access_token(&access, SECRET).is_ok());
        assert!(validate_access_token(&refresh, SECRET).is_err());
        assert!(validate_refresh_token(&refresh, SECRET).is_ok());
        assert!(validate_refresh_token(&access, SECRET).is_err());
    }

    #[test]
    fn test_refresh_access_token() {
        let user_id = Uuid::new_v4();
        let refresh_claims = Claims::new(
            user_id,
            "admin@sprintboard.local".to_string(),
            Role::Admin,
            TokenType::Refresh,
        );
        let refresh_token = create_token(&refresh_claims, SECRET).unwrap();

        let new_access = refresh_access_token(&refresh_token, SECRET).unwrap();
        let validated = validate_access_token(&new_access, SECRET).unwrap();

        assert_eq!(validated.sub, user_id);
        assert_eq!(validated.email, "admin@sprintboard.local");
        assert_eq!(validated.role, Role::Admin);
    }

    #[test]
    fn test_refresh_with_access_token_fails() {
        let access = create_token(&access_claims(), SECRET).unwrap();
        assert!(refresh_access_token(&access, SECRET).is_err());
    }
}
