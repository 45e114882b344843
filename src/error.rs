// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::users::CredentialError;

/// HTTP API error with appropriate status codes and client-friendly messages.
/// The response body shape is `{"error": message}` across every failure path.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized (missing credential, or rejected login password)
    Unauthorized(String),

    // 403 Forbidden (credential present but unverifiable)
    Forbidden(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert domain error types to ApiError
impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            // The duplicate-username contract is a 500 with this exact body;
            // the browser client keys off it.
            CredentialError::DuplicateUsername => {
                ApiError::internal_server_error("User already exists")
            }
            CredentialError::NotFound => ApiError::bad_request("User not found"),
            CredentialError::InvalidCredentials => ApiError::unauthorized("Wrong password"),
            CredentialError::Password(e) => {
                tracing::error!("password hashing error: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            CredentialError::Db(e) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("database error: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenGeneration(msg) => {
                tracing::error!("token generation failed: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            _ => ApiError::forbidden("Invalid or expired token"),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("database error: {}", err);
        ApiError::internal_server_error("An error occurred while processing your request")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_error_contract_mapping() {
        let duplicate: ApiError = CredentialError::DuplicateUsername.into();
        assert_eq!(duplicate.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(duplicate.message(), "User already exists");

        let missing: ApiError = CredentialError::NotFound.into();
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

        let wrong: ApiError = CredentialError::InvalidCredentials.into();
        assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::forbidden("Invalid or expired token");
        assert_eq!(err.to_json(), json!({ "error": "Invalid or expired token" }));
    }
}
