//! Publishing seam between handlers and the event hub.
//!
//! A producer is a connection scoped to a single publish: handlers go
//! through [`publish_once`], which connects, sends one event and closes the
//! producer on every path. An unexpected fault unwinding through
//! `publish_once` still drops (and so releases) the producer.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::EventHubSettings;

use super::connection_string::ConnectionStringError;

/// Largest event the service accepts (Event Hubs Standard tier).
pub const MAX_EVENT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no event hub connection string configured")]
    MissingCredential,
    #[error("invalid connection string: {0}")]
    ConnectionString(#[from] ConnectionStringError),
    #[error("failed to sign request: {0}")]
    Signing(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to reach event hub: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("event hub rejected the event with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("event of {size} bytes exceeds the {limit} byte limit")]
    EventTooLarge { size: usize, limit: usize },
    #[error("failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// An open connection to one event hub.
#[async_trait]
pub trait EventProducer: Send {
    async fn send(&mut self, partition_key: &str, payload: &[u8]) -> Result<(), PublishError>;

    /// Release the connection. Consumes the producer so it cannot be reused.
    async fn close(self: Box<Self>);
}

/// Opens producers for a resolved destination.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProducerFactory: Send + Sync {
    async fn connect(&self, settings: &EventHubSettings) -> Result<Box<dyn EventProducer>, PublishError>;
}

/// Publish `payload` as a single event keyed by `partition_key`.
///
/// The producer is acquired here, used exactly once and closed before
/// returning, whether or not the send succeeded.
pub async fn publish_once(
    factory: &dyn ProducerFactory,
    settings: &EventHubSettings,
    partition_key: &str,
    payload: &[u8],
) -> Result<(), PublishError> {
    if payload.len() > MAX_EVENT_BYTES {
        return Err(PublishError::EventTooLarge {
            size: payload.len(),
            limit: MAX_EVENT_BYTES,
        });
    }

    let mut producer = factory.connect(settings).await?;
    let outcome = producer.send(partition_key, payload).await;
    producer.close().await;

    outcome
}
