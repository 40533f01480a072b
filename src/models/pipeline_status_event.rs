//! Pipeline run status record.
//!
//! Unlike [`InventoryEvent`](super::InventoryEvent), fields here are typed:
//! a value of the wrong JSON type is treated as absent and falls back to
//! the field's default.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::payload::InboundPayload;

pub const UNKNOWN_STATUS: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStatusEvent {
    pub tenant_id: String,
    pub pipeline: Option<String>,
    pub run_id: String,
    pub status: String,
    pub environment: Option<String>,
    pub workspace_id: Option<String>,
    pub started_utc: Option<String>,
    pub ended_utc: Option<String>,
    pub duration_ms: Option<i64>,
    pub received_utc: String,
    pub original: Option<Map<String, Value>>,
}

impl PipelineStatusEvent {
    pub fn from_payload(tenant_id: impl Into<String>, payload: &InboundPayload, received_utc: String) -> Self {
        let text = |name: &str| payload.str_field(name).map(str::to_string);

        Self {
            tenant_id: tenant_id.into(),
            pipeline: text("pipeline"),
            run_id: text("runId").unwrap_or_else(|| Uuid::new_v4().to_string()),
            status: text("status").unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            environment: text("environment"),
            workspace_id: text("workspaceId"),
            started_utc: text("startedUtc"),
            ended_utc: text("endedUtc"),
            duration_ms: payload.i64_field("durationMs"),
            received_utc,
            original: payload.original().cloned(),
        }
    }

    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
