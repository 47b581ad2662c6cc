//! Core types and operations for the calmem service.
//!
//! This crate provides everything below the HTTP boundary:
//! - `Calendar` and `Entry` resource types and their input payloads
//! - `Store`, the lock-guarded in-memory owner of every resource
//! - `ResourceService`, the create/read/update/delete orchestration layer

pub mod calendar;
pub mod entry;
pub mod error;
pub mod keygen;
pub mod service;
pub mod store;
pub mod validate;

// Re-export the main types at crate root for convenience
pub use calendar::{Calendar, CalendarPayload};
pub use entry::{Entry, EntryPayload};
pub use error::{CalmemError, CalmemResult};
pub use service::ResourceService;
pub use store::Store;
pub use validate::{FieldErrors, Payload, validate};
