//! Authentication endpoints: registration, login, token refresh.
//!
//! Login deliberately collapses "no such user" and "wrong password" into a
//! single `invalid_credentials` failure so that a caller cannot probe which
//! emails have accounts.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use sprintboard_shared::{
    auth::{jwt, password},
    models::{
        role::Role,
        user::{CreateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (also checked for strength)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// User ID
    pub user_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: String,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token (24h)
    pub access_token: String,
}

/// Converts validator failures into the API's validation error shape
fn validation_error(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Issues an access/refresh token pair for a user
fn issue_tokens(user: &User, secret: &str) -> Result<(String, String), jwt::JwtError> {
    let access_claims = jwt::Claims::new(
        user.id,
        user.email.clone(),
        user.role,
        jwt::TokenType::Access,
    );
    let refresh_claims = jwt::Claims::new(
        user.id,
        user.email.clone(),
        user.role,
        jwt::TokenType::Refresh,
    );

    Ok((
        jwt::create_token(&access_claims, secret)?,
        jwt::create_token(&refresh_claims, secret)?,
    ))
}

/// Register a new user
///
/// `POST /v1/auth/register` with `{email, password, name}`. New accounts
/// get the Member role; project-scoped roles come from memberships.
///
/// # Errors
///
/// - `422`: validation failed (email format, password strength)
/// - `409`: email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate().map_err(validation_error)?;

    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            name: req.name,
            password_hash,
            role: Role::Member,
        },
    )
    .await?;

    let (access_token, refresh_token) = issue_tokens(&user, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "Registered new user");

    Ok(Json(RegisterResponse {
        user_id: user.id.to_string(),
        access_token,
        refresh_token,
    }))
}

/// Login
///
/// `POST /v1/auth/login` with `{email, password}`. A missing account and a
/// wrong password produce byte-identical 401 responses.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    User::update_last_login(&state.db, user.id).await?;

    let (access_token, refresh_token) = issue_tokens(&user, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        user_id: user.id.to_string(),
        access_token,
        refresh_token,
    }))
}

/// Token refresh
///
/// `POST /v1/auth/refresh` exchanges a valid refresh token for a new
/// access token carrying the same identity claims.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let access_token = jwt::refresh_access_token(&req.refresh_token, state.jwt_secret())?;

    Ok(Json(RefreshResponse { access_token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "Str0ng!Pass".to_string(),
            name: "A".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "short".to_string(),
            name: "A".to_string(),
        };
        assert!(short_password.validate().is_err());

        let ok = RegisterRequest {
            email: "a@b.c".to_string(),
            password: "Str0ng!Pass".to_string(),
            name: "A".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_validation_error_shape() {
        let bad = RegisterRequest {
            email: "nope".to_string(),
            password: "short".to_string(),
            name: String::new(),
        };

        match validation_error(bad.validate().unwrap_err()) {
            ApiError::ValidationError(details) => assert!(details.len() >= 2),
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }
}
