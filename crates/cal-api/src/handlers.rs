//! HTTP API handlers
//!
//! Request handlers for the event endpoints. Each handler performs exactly
//! one store operation.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use cal_core::event::format_date;
use cal_core::Event;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::request::{EventForm, FieldPairs, RangeParams};
use crate::server::AppState;

// ============================================================================
// Response types
// ============================================================================

/// Confirmation returned after creating an event
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i64,
    pub event: String,
    pub date: String,
}

/// Plain message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub const EVENT_ADDED: &str = "The event has been added!";
pub const EVENT_DELETED: &str = "The event has been deleted!";

// ============================================================================
// Handler functions
// ============================================================================

/// GET /event - list all events, or those inside `start_time..=end_time`
///
/// The range only applies when both parameters are present; a single bound
/// is ignored and the full list is returned.
pub async fn list_events(
    State(state): State<AppState>,
    query: std::result::Result<Query<FieldPairs>, QueryRejection>,
) -> Result<Json<Vec<Event>>> {
    let Query(pairs) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let (start, end) = RangeParams::from_pairs(&pairs).bounds()?;
    debug!("List events: start={:?} end={:?}", start, end);

    let events = state.events.list_by_date_range(start, end)?;
    Ok(Json(events))
}

/// GET /event/today
pub async fn list_today(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    Ok(Json(state.events.list_today()?))
}

/// POST /event
pub async fn create_event(
    State(state): State<AppState>,
    EventForm(body): EventForm,
) -> Result<Json<CreatedResponse>> {
    let new_event = body.validate()?;
    let event = state.events.create(new_event)?;

    Ok(Json(CreatedResponse {
        message: EVENT_ADDED,
        id: event.id,
        date: format_date(event.date),
        event: event.name,
    }))
}

/// GET /event/{id}
pub async fn get_event(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Event>> {
    let Path(id) = id.map_err(|_| ApiError::RouteNotFound)?;
    debug!("Get event: {}", id);

    Ok(Json(state.events.get_by_id(id)?))
}

/// DELETE /event/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let Path(id) = id.map_err(|_| ApiError::RouteNotFound)?;

    state.events.delete_by_id(id)?;
    Ok(Json(MessageResponse {
        message: EVENT_DELETED,
    }))
}

/// Fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
