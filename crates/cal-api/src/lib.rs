//! cal-api: HTTP API for the web calendar
//!
//! Provides the REST endpoints for creating, listing, filtering and
//! deleting events. Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod request;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{create_router, start_server, AppState};
