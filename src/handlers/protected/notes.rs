use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{NewNote, Note, NoteChanges, NotePatch, NoteStatus};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub status: NoteStatus,
}

#[derive(Debug, Deserialize, Default)]
pub struct PatchNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<NoteStatus>,
}

#[derive(Debug, Deserialize)]
pub struct PinRequest {
    pub is_pinned: bool,
}

/// GET /notes - All notes owned by the caller, pinned first, newest first
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list(user.user_id).await?;
    Ok(Json(notes))
}

/// POST /notes - Create a note owned by the caller
///
/// Status and pin state in the request body are ignored: the request type
/// does not carry them, and the repository forces pending/unpinned.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<Json<Value>, ApiError> {
    let new_note = NewNote {
        title: required_text(&payload.title, "title")?,
        description: payload.description,
        category: required_text(&payload.category, "category")?,
    };

    let note = state.notes.create(user.user_id, new_note).await?;

    tracing::debug!(note_id = %note.id, "note created");

    Ok(Json(json!({
        "id": note.id,
        "title": note.title,
        "status": note.status,
    })))
}

/// PUT /notes/:id - Full replace of the mutable fields
///
/// A miss — nonexistent id or a note owned by someone else — is a silent
/// no-op: the response is the same `{"success": true}` either way, so a
/// cross-owner probe learns nothing.
#[tracing::instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Result<Json<Value>, ApiError> {
    let changes = NoteChanges {
        title: required_text(&payload.title, "title")?,
        description: payload.description,
        category: required_text(&payload.category, "category")?,
        status: payload.status,
    };

    let matched = state.notes.update(user.user_id, note_id, changes).await?;
    if !matched {
        tracing::debug!(%note_id, "update matched no owned note");
    }

    Ok(Json(json!({ "success": true })))
}

/// PATCH /notes/:id - Merge only the supplied fields
#[tracing::instrument(skip(state, payload))]
pub async fn update_partial(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<PatchNoteRequest>,
) -> Result<Json<Value>, ApiError> {
    let patch = NotePatch {
        title: payload
            .title
            .as_deref()
            .map(|t| required_text(t, "title"))
            .transpose()?,
        description: payload.description,
        category: payload
            .category
            .as_deref()
            .map(|c| required_text(c, "category"))
            .transpose()?,
        status: payload.status,
    };

    let matched = state.notes.merge(user.user_id, note_id, patch).await?;
    if !matched {
        tracing::debug!(%note_id, "patch matched no owned note");
    }

    Ok(Json(json!({ "success": true })))
}

/// PUT /notes/:id/pin - Set the pin flag
#[tracing::instrument(skip(state, payload))]
pub async fn set_pinned(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<PinRequest>,
) -> Result<Json<Value>, ApiError> {
    let matched = state
        .notes
        .set_pinned(user.user_id, note_id, payload.is_pinned)
        .await?;
    if !matched {
        tracing::debug!(%note_id, "pin matched no owned note");
    }

    Ok(Json(json!({ "success": true })))
}

/// DELETE /notes/:id - Remove the note if owned by the caller
#[tracing::instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(note_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let matched = state.notes.delete(user.user_id, note_id).await?;
    if !matched {
        tracing::debug!(%note_id, "delete matched no owned note");
    }

    Ok(Json(json!({ "success": true })))
}

fn required_text(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Field '{}' must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}
