/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Create an account and get a token
/// - `POST /api/auth/login` - Exchange credentials for a token

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, password},
    models::user::{normalize_email, CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};

/// Returned for both unknown emails and wrong passwords
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required."),
        email(message = "Email is not a valid email address.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters."))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required."),
        email(message = "Email is not a valid email address.")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Token issued by register and login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_at_utc: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: String,
}

impl AuthResponse {
    fn issue(user: &User, state: &AppState) -> ApiResult<Self> {
        let issued = jwt::issue_token(user.id, &user.email, state.jwt())?;

        Ok(Self {
            access_token: issued.token,
            expires_at_utc: issued.expires_at,
            user_id: user.id,
            email: user.email.clone(),
        })
    }
}

/// Register a new user
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "SecureP@ss123" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(mut req) = payload?;
    req.email = req.email.trim().to_string();
    req.validate()?;

    let email = normalize_email(&req.email);
    if User::email_exists(&state.db, &email).await? {
        return Err(ApiError::Conflict("Email is already registered.".to_string()));
    }

    let hashed = password::hash_password(&req.password)?;

    // The unique constraint still catches a concurrent registration and
    // surfaces as the same 409.
    let user = User::create(
        &state.db,
        CreateUser {
            email,
            password_hash: hashed.hash,
            password_salt: hashed.salt,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(AuthResponse::issue(&user, &state)?))
}

/// Log in with email and password
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "SecureP@ss123" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(mut req) = payload?;
    req.email = req.email.trim().to_string();
    req.validate()?;

    let Some(user) = User::find_by_email(&state.db, &req.email).await? else {
        tracing::debug!("Login attempt for unknown email");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !password::verify_password(&req.password, &user.password_hash, &user.password_salt)? {
        tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    Ok(Json(AuthResponse::issue(&user, &state)?))
}
