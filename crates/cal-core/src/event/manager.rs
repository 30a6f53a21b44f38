//! Event queries
//!
//! [`EventManager`] is the query layer in front of [`EventStore`]. It owns the
//! single SQLite connection and turns request-level filters into store calls.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::event::{Event, EventStore, NewEvent};
use crate::{Error, Result};

/// Shared handle to the event store
#[derive(Clone)]
pub struct EventManager {
    /// Persistent storage (wrapped in Mutex for thread safety)
    store: Arc<Mutex<EventStore>>,
}

impl EventManager {
    /// Create a manager backed by the database at `db_path`
    pub fn new(db_path: &str) -> Result<Self> {
        Ok(Self::with_store(EventStore::new(db_path)?))
    }

    /// Create an in-memory manager (for testing)
    pub fn in_memory() -> Result<Self> {
        Ok(Self::with_store(EventStore::in_memory()?))
    }

    /// Wrap an already opened store
    pub fn with_store(store: EventStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, EventStore>> {
        self.store
            .lock()
            .map_err(|e| Error::StoreUnavailable(e.to_string()))
    }

    /// Store a new event
    pub fn create(&self, event: NewEvent) -> Result<Event> {
        let event = self.store()?.insert(&event)?;
        info!("Created event {} ({}) on {}", event.id, event.name, event.date);
        Ok(event)
    }

    /// All events, in insertion order
    pub fn list_all(&self) -> Result<Vec<Event>> {
        self.store()?.list_all()
    }

    /// Events with `start <= date <= end`
    ///
    /// Both bounds must be given for the filter to apply. If either one is
    /// missing the full list is returned instead; a half-open range is
    /// treated as "no filter", not as an error.
    pub fn list_by_date_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Event>> {
        match (start, end) {
            (Some(start), Some(end)) => self.store()?.list_between(start, end),
            _ => {
                debug!("Incomplete date range, listing all events");
                self.list_all()
            }
        }
    }

    /// Events dated on the current local calendar day
    pub fn list_today(&self) -> Result<Vec<Event>> {
        self.list_on(Local::now().date_naive())
    }

    /// Events dated on `date`
    pub fn list_on(&self, date: NaiveDate) -> Result<Vec<Event>> {
        self.store()?.list_on(date)
    }

    /// Look up a single event
    pub fn get_by_id(&self, id: i64) -> Result<Event> {
        self.store()?.get(id)?.ok_or(Error::EventNotFound(id))
    }

    /// Delete a single event
    pub fn delete_by_id(&self, id: i64) -> Result<()> {
        if self.store()?.delete(id)? {
            info!("Deleted event {}", id);
            Ok(())
        } else {
            Err(Error::EventNotFound(id))
        }
    }

    /// Number of stored events
    pub fn count(&self) -> Result<usize> {
        self.store()?.count()
    }
}
