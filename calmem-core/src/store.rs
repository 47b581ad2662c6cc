//! The shared in-memory store.
//!
//! One coarse-grained read/write lock guards the entire two-level hierarchy:
//! the calendar map and every entry map inside it. Lookups are free functions
//! over references that can only be obtained inside a scope, so an unguarded
//! lookup does not compile.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::calendar::Calendar;
use crate::entry::Entry;

/// Map from calendar id to calendar; the store's entire state.
pub type CalendarMap = HashMap<String, Calendar>;

/// Lock-guarded owner of every calendar and entry in the process.
///
/// The lock is not reentrant: a caller must never request a write scope
/// while it still holds a read scope. The service keeps every operation
/// inside exactly one scope for this reason.
#[derive(Debug, Default)]
pub struct Store {
    cals: RwLock<CalendarMap>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            cals: RwLock::new(HashMap::new()),
        }
    }

    /// Runs `op` with shared access to the calendar map.
    ///
    /// Any number of read scopes may run concurrently; none may run while a
    /// write scope is open. A panic inside a scope poisons the lock and is
    /// treated as an infrastructure fault.
    pub fn read<T>(&self, op: impl FnOnce(&CalendarMap) -> T) -> T {
        let cals = self.cals.read().expect("store lock poisoned");
        op(&cals)
    }

    /// Runs `op` with exclusive access to the calendar map.
    pub fn write<T>(&self, op: impl FnOnce(&mut CalendarMap) -> T) -> T {
        let mut cals = self.cals.write().expect("store lock poisoned");
        op(&mut cals)
    }
}

/// Looks up a calendar by id. Callable only while a scope is held.
pub fn lookup_calendar<'a>(cals: &'a CalendarMap, id: &str) -> Option<&'a Calendar> {
    cals.get(id)
}

/// Looks up a calendar for mutation. Callable only while a write scope is held.
pub fn lookup_calendar_mut<'a>(cals: &'a mut CalendarMap, id: &str) -> Option<&'a mut Calendar> {
    cals.get_mut(id)
}

/// Looks up an entry within a calendar. Callable only while a scope is held.
pub fn lookup_entry<'a>(cal: &'a Calendar, id: &str) -> Option<&'a Entry> {
    cal.entries.get(id)
}

/// Looks up an entry for mutation. Callable only while a write scope is held.
pub fn lookup_entry_mut<'a>(cal: &'a mut Calendar, id: &str) -> Option<&'a mut Entry> {
    cal.entries.get_mut(id)
}
