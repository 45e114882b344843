pub mod models;
pub mod notes;
pub mod pool;
pub mod users;

pub use notes::NoteRepo;
pub use users::{CredentialError, CredentialStore};
