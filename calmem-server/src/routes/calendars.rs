//! Calendar collection endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use std::collections::HashMap;
use tracing::debug;

use calmem_core::{Calendar, CalendarPayload, Payload};

use crate::routes::{ApiError, reject_invalid};
use crate::state::AppState;

// The path parameter is named {calendar_id} to line up with the entry
// routes; the router requires one name per position across the whole app.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendars", get(list_calendars))
        .route("/calendars", post(create_calendar))
        .route("/calendars/{calendar_id}", get(show_calendar))
        .route("/calendars/{calendar_id}", put(update_calendar))
        .route("/calendars/{calendar_id}", delete(destroy_calendar))
}

/// GET /calendars - List all calendars, keyed by id
async fn list_calendars(State(state): State<AppState>) -> Json<HashMap<String, Calendar>> {
    Json(state.service().list_calendars())
}

/// GET /calendars/:calendar_id - Show one calendar
async fn show_calendar(
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
) -> Result<Json<Calendar>, ApiError> {
    Ok(Json(state.service().get_calendar(&calendar_id)?))
}

/// POST /calendars - Create a calendar
async fn create_calendar(
    State(state): State<AppState>,
    Json(payload): Json<CalendarPayload>,
) -> Result<(StatusCode, Json<Calendar>), ApiError> {
    reject_invalid(Payload::Calendar(&payload))?;

    let cal = state.service().create_calendar(payload)?;
    debug!(id = %cal.id, "calendar created");

    Ok((StatusCode::CREATED, Json(cal)))
}

/// PUT /calendars/:calendar_id - Update a calendar's name
async fn update_calendar(
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
    Json(payload): Json<CalendarPayload>,
) -> Result<Json<Calendar>, ApiError> {
    reject_invalid(Payload::Calendar(&payload))?;

    Ok(Json(state.service().update_calendar(&calendar_id, payload)?))
}

/// DELETE /calendars/:calendar_id - Remove a calendar and every entry it owns
async fn destroy_calendar(
    State(state): State<AppState>,
    Path(calendar_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service().delete_calendar(&calendar_id)?;
    debug!(id = %calendar_id, "calendar deleted");

    Ok(StatusCode::NO_CONTENT)
}
