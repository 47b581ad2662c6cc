//! Entry endpoints, nested under their owning calendar

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use std::collections::HashMap;
use tracing::debug;

use calmem_core::{Entry, EntryPayload, Payload};

use crate::routes::{ApiError, reject_invalid};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendars/{calendar_id}/entries", get(list_entries))
        .route("/calendars/{calendar_id}/entries", post(create_entry))
        .route("/calendars/{calendar_id}/entries/{id}", get(show_entry))
        .route("/calendars/{calendar_id}/entries/{id}", put(update_entry))
        .route("/calendars/{calendar_id}/entries/{id}", delete(destroy_entry))
}

/// GET /calendars/:calendar_id/entries - List a calendar's entries, keyed by id
async fn list_entries(
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
) -> Result<Json<HashMap<String, Entry>>, ApiError> {
    Ok(Json(state.service().list_entries(&calendar_id)?))
}

/// GET /calendars/:calendar_id/entries/:id - Show one entry
async fn show_entry(
    State(state): State<AppState>,
    Path((calendar_id, id)): Path<(String, String)>,
) -> Result<Json<Entry>, ApiError> {
    Ok(Json(state.service().get_entry(&calendar_id, &id)?))
}

/// POST /calendars/:calendar_id/entries - Create an entry
async fn create_entry(
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
    Json(payload): Json<EntryPayload>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    reject_invalid(Payload::Entry(&payload))?;

    let ent = state.service().create_entry(&calendar_id, payload)?;
    debug!(calendar = %calendar_id, id = %ent.id, "entry created");

    Ok((StatusCode::CREATED, Json(ent)))
}

/// PUT /calendars/:calendar_id/entries/:id - Update an entry's supplied fields
async fn update_entry(
    State(state): State<AppState>,
    Path((calendar_id, id)): Path<(String, String)>,
    Json(payload): Json<EntryPayload>,
) -> Result<Json<Entry>, ApiError> {
    reject_invalid(Payload::Entry(&payload))?;

    Ok(Json(state.service().update_entry(&calendar_id, &id, payload)?))
}

/// DELETE /calendars/:calendar_id/entries/:id - Remove an entry
async fn destroy_entry(
    State(state): State<AppState>,
    Path((calendar_id, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.service().delete_entry(&calendar_id, &id)?;
    debug!(calendar = %calendar_id, id = %id, "entry deleted");

    Ok(StatusCode::NO_CONTENT)
}
