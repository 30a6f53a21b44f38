//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{routing::get, Router};

use crate::handlers::{create_event, delete_event, get_event, list_events, list_today, not_found};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Listing and creation
        .route("/event", get(list_events).post(create_event))
        // Static segment takes precedence over `{id}`
        .route("/event/today", get(list_today))
        // Single event
        .route("/event/{id}", get(get_event).delete(delete_event))
        .fallback(not_found)
}
