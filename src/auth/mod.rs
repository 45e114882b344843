use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod password;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed token")]
    Malformed,

    #[error("invalid token signature")]
    SignatureInvalid,

    #[error("token expired")]
    Expired,

    #[error("token generation failed: {0}")]
    TokenGeneration(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Malformed,
        }
    }
}

/// Issues and verifies the signed session tokens carried in the
/// Authorization header. Stateless: nothing is stored server-side, each
/// request is verified independently against the signing secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours as i64)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = TokenService::new("test-secret", 1);
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id, "alice").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_signature_invalid() {
        let issuer = TokenService::new("secret-1", 1);
        let verifier = TokenService::new("secret-2", 1);

        let token = issuer.issue(Uuid::new_v4(), "alice").unwrap();
        let err = verifier.verify(&token).unwrap_err();

        assert!(matches!(err, AuthError::SignatureInvalid), "got {:?}", err);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = TokenService::new("test-secret", 1);

        let err = service.verify("not-a-jwt").unwrap_err();

        assert!(matches!(err, AuthError::Malformed), "got {:?}", err);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new("test-secret", 1);
        let now = Utc::now();
        // Expired well beyond the default validation leeway
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "alice".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();

        assert!(matches!(err, AuthError::Expired), "got {:?}", err);
    }
}
