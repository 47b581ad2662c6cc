//! Entry resources and their input payloads.

use serde::{Deserialize, Serialize};

/// A timed entry owned by exactly one calendar.
///
/// Start and end are kept exactly as the caller supplied them; the empty
/// string means the field was never set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    #[serde(skip_serializing)]
    pub id: String,
    #[serde(rename = "startTime")]
    pub start: String,
    #[serde(rename = "endTime")]
    pub end: String,
    #[serde(rename = "description")]
    pub desc: String,
}

/// Candidate values for creating or updating an entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryPayload {
    #[serde(default, rename = "startTime")]
    pub start: String,
    #[serde(default, rename = "endTime")]
    pub end: String,
    #[serde(default, rename = "description")]
    pub desc: String,
}
