//! Pipeline run status ingestion.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};

use crate::middleware::TenantId;
use crate::models::{InboundPayload, PipelineStatusEvent};
use crate::services::{publish_once, PublishError};
use crate::utils::timestamp;
use crate::AppState;

/// `POST /api/pipeline-status`
///
/// - 202: event published
/// - 413: body or event larger than a single event hub message allows
/// - 500: any other publish failure
///
/// All responses have an empty body.
#[instrument(name = "ingest_pipeline_status", skip_all, fields(tenant_id = %tenant))]
pub async fn ingest_pipeline_status(
    State(state): State<AppState>,
    tenant: TenantId,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            warn!(error = %rejection, status = status.as_u16(), "Failed to read pipeline status body");
            return status.into_response();
        }
    };
    let payload = InboundPayload::parse(&body);
    let event = PipelineStatusEvent::from_payload(tenant.as_str(), &payload, timestamp::received_now());

    let outcome = match event.to_bytes() {
        Ok(bytes) => {
            let settings = state.config.event_hub();
            publish_once(state.producers.as_ref(), &settings, tenant.as_str(), &bytes).await
        }
        Err(e) => Err(PublishError::from(e)),
    };

    match outcome {
        Ok(()) => {
            info!(run_id = %event.run_id, status = %event.status, "Pipeline status enqueued");
            StatusCode::ACCEPTED.into_response()
        }
        Err(PublishError::EventTooLarge { size, limit }) => {
            warn!(size, limit, run_id = %event.run_id, "Pipeline status event too large");
            StatusCode::PAYLOAD_TOO_LARGE.into_response()
        }
        Err(e) => {
            error!(error = %e, run_id = %event.run_id, "Failed to enqueue pipeline status");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
