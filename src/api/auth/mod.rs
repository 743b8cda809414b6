//! Authentication API endpoints
//!
//! Registration, form-encoded login issuing bearer tokens, and the current
//! user lookup.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Form, Json};
use crate::domain::user::User;
use crate::infrastructure::user::{AccessToken, RegisterUserRequest};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(get_current_user))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login form fields
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Plain message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Issued token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.token,
            token_type: AccessToken::TOKEN_TYPE,
        }
    }
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            username: user.username().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    debug!(username = %request.username, "Registration request");

    state
        .user_service
        .register(RegisterUserRequest {
            username: request.username,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created".to_string(),
        }),
    ))
}

/// POST /auth/login
///
/// Takes `application/x-www-form-urlencoded` credentials.
pub async fn login(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(Json(token.into()))
}

/// GET /auth/me
pub async fn get_current_user(RequireUser(user): RequireUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
