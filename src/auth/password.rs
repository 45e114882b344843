//! Password hashing and verification, bcrypt with a tunable cost factor.
//!
//! Hashing is the one CPU-bound step in the request path, so both functions
//! run the bcrypt work on the blocking thread pool instead of the async
//! executor. The salt is generated per hash and embedded in the stored
//! string; `verify` uses bcrypt's own comparison rather than raw byte
//! equality.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub async fn hash(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(ok)
}
