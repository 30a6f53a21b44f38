//! Event persistence using SQLite

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use crate::event::types::{format_date, parse_date, Event, NewEvent};
use crate::Result;

const SELECT_EVENTS: &str = "SELECT id, event, date FROM events";

/// SQLite-based event store
pub struct EventStore {
    conn: Connection,
}

impl EventStore {
    /// Open (or create) the event database at the given path
    pub fn new(db_path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Opening event database at: {}", db_path);
        let conn = Connection::open(db_path)?;
        let store = Self { conn };
        store.init_tables()?;
        info!("EventStore initialized at {}", db_path);
        Ok(store)
    }

    /// Create an in-memory event store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_tables()?;
        Ok(store)
    }

    /// Initialize database tables
    fn init_tables(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                event VARCHAR(80) NOT NULL,
                date DATE NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_events_date ON events(date)",
            [],
        )?;

        Ok(())
    }

    /// Insert an event and return it with its assigned id
    pub fn insert(&self, event: &NewEvent) -> Result<Event> {
        self.conn.execute(
            "INSERT INTO events (event, date) VALUES (?1, ?2)",
            params![event.name, format_date(event.date)],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("Inserted event {} on {}", id, event.date);

        Ok(Event {
            id,
            name: event.name.clone(),
            date: event.date,
        })
    }

    /// Load an event by id
    pub fn get(&self, id: i64) -> Result<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1", SELECT_EVENTS))?;

        match stmt.query_row(params![id], event_from_row) {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an event by id, returning whether a row was removed
    pub fn delete(&self, id: i64) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])?;

        if rows_affected > 0 {
            debug!("Deleted event {}", id);
        }
        Ok(rows_affected > 0)
    }

    /// List every event in insertion order
    pub fn list_all(&self) -> Result<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id", SELECT_EVENTS))?;

        let events = stmt
            .query_map([], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} events", events.len());
        Ok(events)
    }

    /// List events with `start <= date <= end`
    pub fn list_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE date >= ?1 AND date <= ?2 ORDER BY id",
            SELECT_EVENTS
        ))?;

        let events = stmt
            .query_map(params![format_date(start), format_date(end)], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Found {} events between {} and {}", events.len(), start, end);
        Ok(events)
    }

    /// List events on a single date
    pub fn list_on(&self, date: NaiveDate) -> Result<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE date = ?1 ORDER BY id", SELECT_EVENTS))?;

        let events = stmt
            .query_map(params![format_date(date)], event_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Found {} events on {}", events.len(), date);
        Ok(events)
    }

    /// Count stored events
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    let date_str: String = row.get(2)?;
    let date = parse_date(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("invalid event date '{}'", date_str).into(),
        )
    })?;

    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        date,
    })
}
