use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /register - Create a new user account
///
/// Stores only a salted hash of the password. A duplicate username is
/// reported as a 500 with `{"error": "User already exists"}` — the shape
/// the browser client expects.
#[tracing::instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    validate_username(&payload.username).map_err(|msg| ApiError::bad_request(msg))?;
    validate_password(&payload.password).map_err(|msg| ApiError::bad_request(msg))?;

    let user_id = state
        .credentials
        .register(&payload.username, &payload.password)
        .await?;

    tracing::info!(%user_id, username = %payload.username, "user registered");

    Ok(Json(json!({ "message": "User registered!" })))
}

/// POST /login - Authenticate and receive a session token
///
/// Unknown username → 400, wrong password → 401, both with `{"error"}`
/// bodies. On success the response is `{"token": <jwt>}`.
#[tracing::instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .credentials
        .verify(&payload.username, &payload.password)
        .await?;

    let token = state.tokens.issue(user.id, &user.username)?;

    tracing::debug!(user_id = %user.id, "login succeeded");

    Ok(Json(json!({ "token": token })))
}

fn validate_username(username: &str) -> Result<(), String> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }

    if username.len() > 50 {
        return Err("Username must be less than 50 characters".to_string());
    }

    // Allow alphanumeric, underscore, hyphen
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(
            "Username can only contain letters, numbers, underscore, and hyphen".to_string(),
        );
    }

    // Must start with alphanumeric
    if !username.chars().next().is_some_and(|c| c.is_alphanumeric()) {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    Ok(())
}
