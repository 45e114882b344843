use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::notes::NoteRepo;
use crate::database::users::CredentialStore;

/// Shared application state, built once in `main` before serving begins.
/// The signing secret and the connection pool live here rather than in
/// globals; every component that needs them receives them at construction.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub credentials: CredentialStore,
    pub notes: NoteRepo,
    pub tokens: TokenService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let tokens = TokenService::new(
            &config.security.jwt_secret,
            config.security.jwt_expiry_hours,
        );
        let credentials = CredentialStore::new(pool.clone(), config.security.bcrypt_cost);
        let notes = NoteRepo::new(pool.clone());

        Self {
            pool,
            credentials,
            notes,
            tokens,
            config: Arc::new(config),
        }
    }
}
