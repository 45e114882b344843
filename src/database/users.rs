use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{self, PasswordError};
use crate::database::models::User;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("username already taken")]
    DuplicateUsername,

    #[error("user not found")]
    NotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Persists username + salted password hash; the plaintext never reaches
/// the database. Username uniqueness is enforced by the unique constraint
/// at insert, not by a separate existence check.
#[derive(Clone)]
pub struct CredentialStore {
    pool: PgPool,
    bcrypt_cost: u32,
}

impl CredentialStore {
    pub fn new(pool: PgPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Uuid, CredentialError> {
        let password_hash = password::hash(password, self.bcrypt_cost).await?;
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO users (id, username, password_hash) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(username)
            .bind(&password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    CredentialError::DuplicateUsername
                }
                other => CredentialError::Db(other),
            })?;

        Ok(id)
    }

    pub async fn verify(&self, username: &str, password: &str) -> Result<User, CredentialError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CredentialError::NotFound)?;

        if password::verify(password, &user.password_hash).await? {
            Ok(user)
        } else {
            Err(CredentialError::InvalidCredentials)
        }
    }
}
