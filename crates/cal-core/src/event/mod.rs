//! Calendar events
//!
//! This module provides the event type, its SQLite-backed store and the
//! query layer used by the HTTP handlers.

mod manager;
mod store;
mod types;

pub use manager::EventManager;
pub use store::EventStore;
pub use types::{format_date, parse_date, validate_name, Event, NewEvent, DATE_FORMAT, MAX_NAME_LEN};
