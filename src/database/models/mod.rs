pub mod note;
pub mod user;

pub use note::{NewNote, Note, NoteChanges, NotePatch, NoteStatus};
pub use user::User;
