//! cal-core: Web Calendar Core Library
//!
//! Event model, SQLite persistence and the query layer shared by the
//! HTTP API and the server binary.

pub mod config;
pub mod error;
pub mod event;

pub use config::{Config, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use event::{Event, EventManager, EventStore, NewEvent};
