use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

/// Authentication middleware applied to every protected route.
///
/// A missing bearer credential is rejected with 401; a credential that is
/// present but fails verification is rejected with 403. On success the
/// verified identity is attached to the request's extensions for the rest
/// of that request's handling — no session state survives the request.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = state.tokens.verify(&token).map_err(|err| {
        tracing::debug!("token rejected: {}", err);
        ApiError::forbidden("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| "Authorization header must use Bearer token format".to_string())?;

    if token.trim().is_empty() {
        return Err("Empty bearer token".to_string());
    }

    Ok(token.to_string())
}
