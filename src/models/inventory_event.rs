//! Normalized inventory-update record published to the event hub.

use serde::Serialize;
use serde_json::{Map, Value};

use super::payload::InboundPayload;

/// One inventory update, enriched with tenant and capture time.
///
/// Recognized fields are copied verbatim from the request body (no coercion);
/// `original` carries the full body when it was a JSON object. Field order
/// matches the published JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEvent {
    pub tenant_id: String,
    pub inventory_id: Option<Value>,
    pub item: Option<Value>,
    pub quantity: Option<Value>,
    pub timestamp_utc: Option<Value>,
    pub received_utc: String,
    pub original: Option<Map<String, Value>>,
}

impl InventoryEvent {
    pub fn from_payload(tenant_id: impl Into<String>, payload: &InboundPayload, received_utc: String) -> Self {
        let copy = |name: &str| payload.field(name).cloned();

        Self {
            tenant_id: tenant_id.into(),
            inventory_id: copy("inventoryId"),
            item: copy("item"),
            quantity: copy("quantity"),
            timestamp_utc: copy("timestampUtc"),
            received_utc,
            original: payload.original().cloned(),
        }
    }

    /// Compact UTF-8 JSON bytes as sent on the wire.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
