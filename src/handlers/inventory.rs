//! Inventory-update ingestion.
//!
//! Accepts any body, normalizes it into an [`InventoryEvent`] and publishes
//! it once to the event hub keyed by tenant. Malformed JSON is tolerated;
//! only publish failures produce an error response, and every one of them
//! looks the same to the caller.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument};

use crate::middleware::TenantId;
use crate::models::{InboundPayload, InventoryEvent};
use crate::services::{publish_once, PublishError};
use crate::utils::timestamp;
use crate::AppState;

/// Body of every publish-path failure response.
pub const ENQUEUE_FAILED: &str = "Failed to enqueue";

/// `POST /api/PipelineInventory`
///
/// - 202, empty body: event published
/// - 500, `Failed to enqueue`: credential, connection or publish failure,
///   including a body too large to buffer
#[instrument(name = "ingest_inventory", skip_all, fields(tenant_id = %tenant))]
pub async fn ingest_inventory(
    State(state): State<AppState>,
    tenant: TenantId,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!(error = %rejection, "Failed to read inventory request body");
            return (StatusCode::INTERNAL_SERVER_ERROR, ENQUEUE_FAILED).into_response();
        }
    };
    let payload = InboundPayload::parse(&body);
    let event = InventoryEvent::from_payload(tenant.as_str(), &payload, timestamp::received_now());

    match publish(&state, &tenant, &event).await {
        Ok(()) => {
            info!(malformed_body = payload.is_malformed(), "Inventory event enqueued");
            StatusCode::ACCEPTED.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to enqueue inventory event");
            (StatusCode::INTERNAL_SERVER_ERROR, ENQUEUE_FAILED).into_response()
        }
    }
}

async fn publish(state: &AppState, tenant: &TenantId, event: &InventoryEvent) -> Result<(), PublishError> {
    let bytes = event.to_bytes()?;
    let settings = state.config.event_hub();
    publish_once(state.producers.as_ref(), &settings, tenant.as_str(), &bytes).await
}
