use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{NewNote, Note, NoteChanges, NotePatch};

/// Ownership-scoped note storage. Every statement that touches a note
/// carries the `id AND owner_id` predicate, so a probe against another
/// owner's note is indistinguishable from a nonexistent id: both match
/// zero rows. There is no fetch-then-check step anywhere in this module.
#[derive(Clone)]
pub struct NoteRepo {
    pool: PgPool,
}

const NOTE_COLUMNS: &str = "id, owner_id, title, description, category, status, is_pinned, created_at";

impl NoteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All notes owned by `owner_id`, pinned first, newest first within
    /// each group. Result sets are bounded by one user's notes, so the
    /// rows are materialized eagerly.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(&format!(
            "SELECT {} FROM notes WHERE owner_id = $1 ORDER BY is_pinned DESC, created_at DESC",
            NOTE_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Insert a new note for `owner_id`. Status and pin state come from
    /// the column defaults (pending, unpinned) no matter what the client
    /// sent.
    pub async fn create(&self, owner_id: Uuid, note: NewNote) -> Result<Note, sqlx::Error> {
        sqlx::query_as::<_, Note>(&format!(
            "INSERT INTO notes (id, owner_id, title, description, category)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            NOTE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&note.title)
        .bind(&note.description)
        .bind(&note.category)
        .fetch_one(&self.pool)
        .await
    }

    /// Full replace of the mutable fields. Returns whether a row owned by
    /// the caller matched.
    pub async fn update(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        changes: NoteChanges,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET title = $3, description = $4, category = $5, status = $6
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(note_id)
        .bind(owner_id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.category)
        .bind(changes.status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Merge only the supplied fields; unsupplied fields keep their
    /// current values. A null description cannot be distinguished from an
    /// absent one here, so clearing a description goes through `update`.
    pub async fn merge(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        patch: NotePatch,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET title = COALESCE($3, title),
                              description = COALESCE($4, description),
                              category = COALESCE($5, category),
                              status = COALESCE($6, status)
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(note_id)
        .bind(owner_id)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(&patch.category)
        .bind(patch.status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Update only the pin flag
    pub async fn set_pinned(
        &self,
        owner_id: Uuid,
        note_id: Uuid,
        is_pinned: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET is_pinned = $3 WHERE id = $1 AND owner_id = $2",
        )
        .bind(note_id)
        .bind(owner_id)
        .bind(is_pinned)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, owner_id: Uuid, note_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(note_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
