pub mod calendars;
pub mod entries;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use calmem_core::{CalmemError, FieldErrors, Payload, validate};

/// Body of a 400 response: one message per rejected field.
#[derive(Serialize)]
pub struct ValidationResponse {
    pub fields: FieldErrors,
}

/// Maps core errors onto the HTTP status contract: validation failures are
/// 400 with the field errors, absent resources are 404 with an empty body.
pub struct ApiError(CalmemError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            CalmemError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, Json(ValidationResponse { fields })).into_response()
            }
            CalmemError::CalendarNotFound(_) | CalmemError::EntryNotFound(_) => {
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}

impl From<CalmemError> for ApiError {
    fn from(err: CalmemError) -> Self {
        Self(err)
    }
}

/// Request-level rejection: turns a failed validation into a 400 before the
/// service is ever invoked.
pub fn reject_invalid(payload: Payload<'_>) -> Result<(), ApiError> {
    let errors = validate(payload);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError(CalmemError::Validation(errors)))
    }
}
