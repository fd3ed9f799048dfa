//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::db::{self, EventFilter};
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    /// Offer index, lot index or manager address the events were filtered by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
///
/// Returns all indexed events.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    respond(&state.pool, EventFilter::All, None).await
}

/// `GET /offers/:id/events`
///
/// Catalog and order events for one offer, plus lots prepared from it.
pub async fn get_offer_events(
    State(state): State<Arc<ApiState>>,
    Path(offer_index): Path<u32>,
) -> Response {
    let subject = offer_index.to_string();
    respond(&state.pool, EventFilter::Offer(offer_index.into()), Some(subject)).await
}

/// `GET /lots/:id/events`
pub async fn get_lot_events(
    State(state): State<Arc<ApiState>>,
    Path(lot_index): Path<u32>,
) -> Response {
    let subject = lot_index.to_string();
    respond(&state.pool, EventFilter::Lot(lot_index.into()), Some(subject)).await
}

/// `GET /managers/:address/events`
///
/// Certification history and settlements for one manager.
pub async fn get_manager_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    let filter = EventFilter::Manager(address.clone());
    respond(&state.pool, filter, Some(address)).await
}

async fn respond(pool: &SqlitePool, filter: EventFilter, subject: Option<String>) -> Response {
    match db::get_events(pool, &filter).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(EventsResponse {
                    subject,
                    count,
                    events,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Event query failed for {filter:?}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
