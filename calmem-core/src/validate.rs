//! Payload validation.
//!
//! Pure predicates over candidate payload values; nothing here touches the
//! store or performs I/O.

use std::collections::BTreeMap;

use chrono::DateTime;

use crate::calendar::CalendarPayload;
use crate::entry::EntryPayload;

/// Fixed layout for entry times, e.g. `2014-03-31 10:00:00 +0000`.
pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S %z";

const REQUIRED: &str = "Required attribute missing";
const MALFORMED_TIME: &str = "Malformed time specification";

/// Field-name to message map; empty means the payload is valid.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// A candidate payload of either resource kind.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    Calendar(&'a CalendarPayload),
    Entry(&'a EntryPayload),
}

/// Checks a payload for well-formedness, returning one error per bad field.
pub fn validate(payload: Payload<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match payload {
        Payload::Calendar(cal) => {
            if cal.name.is_empty() {
                errors.insert("name", REQUIRED);
            }
        }
        Payload::Entry(ent) => {
            check_time("startTime", &ent.start, &mut errors);
            check_time("endTime", &ent.end, &mut errors);
        }
    }
    errors
}

/// An empty time means "not supplied" and passes; anything else must parse
/// under the fixed layout.
fn check_time(field: &'static str, value: &str, errors: &mut FieldErrors) {
    if !value.is_empty() && DateTime::parse_from_str(value, TIME_LAYOUT).is_err() {
        errors.insert(field, MALFORMED_TIME);
    }
}
