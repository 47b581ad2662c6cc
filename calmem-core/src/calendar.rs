//! Calendar resources and their input payloads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entry::Entry;

/// A named calendar owning a collection of entries.
///
/// The id is assigned by the store on creation and never changes. It is not
/// serialized into response bodies; clients learn ids from the keys of
/// collection listings.
#[derive(Debug, Clone, Serialize)]
pub struct Calendar {
    #[serde(skip_serializing)]
    pub id: String,
    pub name: String,
    pub entries: HashMap<String, Entry>,
}

/// Candidate values for creating or updating a calendar.
///
/// Fields missing from the decoded body default to the empty string, which
/// update treats as "not supplied".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarPayload {
    #[serde(default)]
    pub name: String,
}
