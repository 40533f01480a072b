//! Server-side capture timestamps (`receivedUtc`).

use chrono::{DateTime, Utc};

const RECEIVED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Format an instant as ISO-8601 UTC with microseconds and a trailing `Z`,
/// e.g. `2024-01-01T08:30:00.123456Z`.
pub fn format_received(at: DateTime<Utc>) -> String {
    at.format(RECEIVED_FORMAT).to_string()
}

pub fn received_now() -> String {
    format_received(Utc::now())
}
