//! Create/read/update/delete orchestration over the store.
//!
//! Every operation runs under exactly one scope: reads resolve the id chain
//! and clone the result out under a read scope; mutations resolve and apply
//! under a single write scope. The store's lock is not reentrant, so a
//! lookup must never still hold a read scope when a write scope is
//! requested; keeping each operation inside one scope rules that out.
//!
//! Identifiers are generated before a write scope opens, so no entropy
//! syscall ever happens under the lock.

use std::collections::HashMap;
use std::sync::Arc;

use crate::calendar::{Calendar, CalendarPayload};
use crate::entry::{Entry, EntryPayload};
use crate::error::{CalmemError, CalmemResult};
use crate::keygen;
use crate::store::{self, CalendarMap, Store};
use crate::validate::{Payload, validate};

/// The only component the HTTP boundary talks to.
#[derive(Clone)]
pub struct ResourceService {
    store: Arc<Store>,
}

impl ResourceService {
    /// Wraps the store constructed by the composition root.
    pub fn new(store: Arc<Store>) -> Self {
        ResourceService { store }
    }

    // =========================================================================
    // Calendar operations
    // =========================================================================

    /// Snapshot of every calendar, keyed by id.
    pub fn list_calendars(&self) -> CalendarMap {
        self.store.read(|cals| cals.clone())
    }

    pub fn get_calendar(&self, id: &str) -> CalmemResult<Calendar> {
        self.store.read(|cals| {
            store::lookup_calendar(cals, id)
                .cloned()
                .ok_or_else(|| CalmemError::CalendarNotFound(id.to_string()))
        })
    }

    /// Validates the payload, assigns a fresh id, and inserts a calendar
    /// with an empty entry map. Nothing is written when validation fails.
    pub fn create_calendar(&self, payload: CalendarPayload) -> CalmemResult<Calendar> {
        let errors = validate(Payload::Calendar(&payload));
        if !errors.is_empty() {
            return Err(CalmemError::Validation(errors));
        }

        let cal = Calendar {
            id: keygen::make_key(),
            name: payload.name,
            entries: HashMap::new(),
        };
        self.store.write(|cals| {
            cals.insert(cal.id.clone(), cal.clone());
        });
        Ok(cal)
    }

    /// Overwrites the name when the payload supplies one, returning the
    /// calendar post-mutation.
    pub fn update_calendar(&self, id: &str, payload: CalendarPayload) -> CalmemResult<Calendar> {
        self.store.write(|cals| {
            let cal = store::lookup_calendar_mut(cals, id)
                .ok_or_else(|| CalmemError::CalendarNotFound(id.to_string()))?;

            let errors = validate(Payload::Calendar(&payload));
            if !errors.is_empty() {
                return Err(CalmemError::Validation(errors));
            }

            if !payload.name.is_empty() {
                cal.name = payload.name;
            }
            Ok(cal.clone())
        })
    }

    /// Removes a calendar and, with it, every entry it owns.
    pub fn delete_calendar(&self, id: &str) -> CalmemResult<()> {
        self.store.write(|cals| {
            cals.remove(id)
                .map(|_| ())
                .ok_or_else(|| CalmemError::CalendarNotFound(id.to_string()))
        })
    }

    // =========================================================================
    // Entry operations
    // =========================================================================

    /// Snapshot of one calendar's entries, keyed by id.
    pub fn list_entries(&self, calendar_id: &str) -> CalmemResult<HashMap<String, Entry>> {
        self.store.read(|cals| {
            store::lookup_calendar(cals, calendar_id)
                .map(|cal| cal.entries.clone())
                .ok_or_else(|| CalmemError::CalendarNotFound(calendar_id.to_string()))
        })
    }

    pub fn get_entry(&self, calendar_id: &str, id: &str) -> CalmemResult<Entry> {
        self.store.read(|cals| {
            let cal = store::lookup_calendar(cals, calendar_id)
                .ok_or_else(|| CalmemError::CalendarNotFound(calendar_id.to_string()))?;
            store::lookup_entry(cal, id)
                .cloned()
                .ok_or_else(|| CalmemError::EntryNotFound(id.to_string()))
        })
    }

    pub fn create_entry(&self, calendar_id: &str, payload: EntryPayload) -> CalmemResult<Entry> {
        let errors = validate(Payload::Entry(&payload));
        if !errors.is_empty() {
            return Err(CalmemError::Validation(errors));
        }

        let ent = Entry {
            id: keygen::make_key(),
            start: payload.start,
            end: payload.end,
            desc: payload.desc,
        };
        self.store.write(|cals| {
            let cal = store::lookup_calendar_mut(cals, calendar_id)
                .ok_or_else(|| CalmemError::CalendarNotFound(calendar_id.to_string()))?;
            cal.entries.insert(ent.id.clone(), ent.clone());
            Ok(ent)
        })
    }

    /// Overwrites each field the payload supplies; fields left empty keep
    /// their stored values. There is no way to clear a field to empty here.
    pub fn update_entry(
        &self,
        calendar_id: &str,
        id: &str,
        payload: EntryPayload,
    ) -> CalmemResult<Entry> {
        self.store.write(|cals| {
            let cal = store::lookup_calendar_mut(cals, calendar_id)
                .ok_or_else(|| CalmemError::CalendarNotFound(calendar_id.to_string()))?;
            let ent = store::lookup_entry_mut(cal, id)
                .ok_or_else(|| CalmemError::EntryNotFound(id.to_string()))?;

            let errors = validate(Payload::Entry(&payload));
            if !errors.is_empty() {
                return Err(CalmemError::Validation(errors));
            }

            if !payload.desc.is_empty() {
                ent.desc = payload.desc;
            }
            if !payload.start.is_empty() {
                ent.start = payload.start;
            }
            if !payload.end.is_empty() {
                ent.end = payload.end;
            }
            Ok(ent.clone())
        })
    }

    pub fn delete_entry(&self, calendar_id: &str, id: &str) -> CalmemResult<()> {
        self.store.write(|cals| {
            let cal = store::lookup_calendar_mut(cals, calendar_id)
                .ok_or_else(|| CalmemError::CalendarNotFound(calendar_id.to_string()))?;
            cal.entries
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| CalmemError::EntryNotFound(id.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn service() -> ResourceService {
        ResourceService::new(Arc::new(Store::new()))
    }

    fn named(name: &str) -> CalendarPayload {
        CalendarPayload {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_created_calendar_round_trips() {
        let service = service();

        let created = service.create_calendar(named("Team")).unwrap();
        let fetched = service.get_calendar(&created.id).unwrap();

        assert_eq!(fetched.name, "Team");
        assert!(fetched.entries.is_empty());
    }

    #[test]
    fn test_create_rejects_an_unnamed_calendar() {
        let service = service();

        let err = service.create_calendar(CalendarPayload::default()).unwrap_err();
        assert!(matches!(err, CalmemError::Validation(ref fields) if fields.contains_key("name")));
        assert!(service.list_calendars().is_empty());
    }

    #[test]
    fn test_missing_calendar_reports_not_found() {
        let err = service().get_calendar("0000000000000000").unwrap_err();
        assert!(matches!(err, CalmemError::CalendarNotFound(_)));
    }

    #[test]
    fn test_update_overwrites_a_supplied_name() {
        let service = service();
        let cal = service.create_calendar(named("First")).unwrap();

        let updated = service.update_calendar(&cal.id, named("Second")).unwrap();

        assert_eq!(updated.name, "Second");
        assert_eq!(updated.id, cal.id);
        assert_eq!(service.get_calendar(&cal.id).unwrap().name, "Second");
    }

    #[test]
    fn test_partial_update_preserves_unset_fields() {
        let service = service();
        let cal = service.create_calendar(named("Team")).unwrap();
        let ent = service
            .create_entry(
                &cal.id,
                EntryPayload {
                    desc: "d1".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = service
            .update_entry(
                &cal.id,
                &ent.id,
                EntryPayload {
                    desc: "d2".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.start, "");
        assert_eq!(updated.end, "");
        assert_eq!(updated.desc, "d2");
    }

    // An empty payload field means "not supplied", so update has no way of
    // clearing a stored value back to empty.
    #[test]
    fn test_update_with_empty_field_leaves_value_in_place() {
        let service = service();
        let cal = service.create_calendar(named("Team")).unwrap();
        let ent = service
            .create_entry(
                &cal.id,
                EntryPayload {
                    start: "2014-03-31 10:00:00 +0000".to_string(),
                    desc: "d1".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = service
            .update_entry(
                &cal.id,
                &ent.id,
                EntryPayload {
                    end: "2014-03-31 11:00:00 +0000".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.start, "2014-03-31 10:00:00 +0000");
        assert_eq!(updated.desc, "d1");
        assert_eq!(updated.end, "2014-03-31 11:00:00 +0000");
    }

    #[test]
    fn test_malformed_time_rejected_without_mutation() {
        let service = service();
        let cal = service.create_calendar(named("Team")).unwrap();
        let ent = service
            .create_entry(
                &cal.id,
                EntryPayload {
                    start: "2014-03-31 10:00:00 +0000".to_string(),
                    desc: "d1".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        let err = service
            .update_entry(
                &cal.id,
                &ent.id,
                EntryPayload {
                    start: "not-a-date".to_string(),
                    desc: "d2".to_string(),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, CalmemError::Validation(_)));
        let stored = service.get_entry(&cal.id, &ent.id).unwrap();
        assert_eq!(stored.start, "2014-03-31 10:00:00 +0000");
        assert_eq!(stored.desc, "d1");
    }

    #[test]
    fn test_deleting_a_calendar_cascades_to_its_entries() {
        let service = service();
        let cal = service.create_calendar(named("Team")).unwrap();
        let ent = service
            .create_entry(
                &cal.id,
                EntryPayload {
                    desc: "doomed".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        service.delete_calendar(&cal.id).unwrap();

        // The owning calendar is the first absent link in the chain.
        let err = service.get_entry(&cal.id, &ent.id).unwrap_err();
        assert!(matches!(err, CalmemError::CalendarNotFound(_)));
    }

    #[test]
    fn test_deleting_an_entry_leaves_its_calendar() {
        let service = service();
        let cal = service.create_calendar(named("Team")).unwrap();
        let ent = service
            .create_entry(
                &cal.id,
                EntryPayload {
                    desc: "gone".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();

        service.delete_entry(&cal.id, &ent.id).unwrap();

        let err = service.get_entry(&cal.id, &ent.id).unwrap_err();
        assert!(matches!(err, CalmemError::EntryNotFound(_)));
        assert!(service.get_calendar(&cal.id).unwrap().entries.is_empty());
    }

    #[test]
    fn test_concurrent_creates_yield_distinct_calendars() {
        let service = service();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                thread::spawn(move || {
                    for j in 0..25 {
                        service.create_calendar(named(&format!("cal-{i}-{j}"))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Map keys are the generated ids, so 200 surviving calendars means
        // 200 distinct ids.
        assert_eq!(service.list_calendars().len(), 200);
    }

    #[test]
    fn test_reads_started_after_a_write_observe_it() {
        let service = service();
        let cal = service.create_calendar(named("before")).unwrap();

        let writer = {
            let service = service.clone();
            let id = cal.id.clone();
            thread::spawn(move || {
                service.update_calendar(&id, named("after")).unwrap();
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                let id = cal.id.clone();
                thread::spawn(move || service.get_calendar(&id).unwrap().name)
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            let name = reader.join().unwrap();
            assert!(name == "before" || name == "after");
        }

        // The write has committed, so a fresh read must reflect it.
        assert_eq!(service.get_calendar(&cal.id).unwrap().name, "after");
    }
}
