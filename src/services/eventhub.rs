//! Event Hubs producer over the REST "send event" API.
//!
//! Each producer owns its own HTTP client, built on connect and dropped on
//! close, so no connection outlives the publish it was opened for.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::debug;

use crate::config::EventHubSettings;

use super::connection_string::{ConnectionString, Credential};
use super::publisher::{EventProducer, ProducerFactory, PublishError};
use super::sas;

const API_VERSION: &str = "2014-01";
const SEND_TIMEOUT_SECS: u32 = 60;
const EVENT_CONTENT_TYPE: &str = "application/atom+xml;type=entry;charset=utf-8";

/// Opens REST producers from the configured connection string.
#[derive(Debug, Clone, Default)]
pub struct EventHubProducerFactory;

impl EventHubProducerFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProducerFactory for EventHubProducerFactory {
    async fn connect(&self, settings: &EventHubSettings) -> Result<Box<dyn EventProducer>, PublishError> {
        let raw = settings
            .connection_string
            .as_deref()
            .ok_or(PublishError::MissingCredential)?;
        let connection = ConnectionString::parse(raw)?;
        let hub = connection.hub_name(&settings.hub_name).to_string();

        let resource_uri = format!("{}/{}", connection.base_url(), hub);
        let authorization = match &connection.credential {
            Credential::SharedKey { key_name, key } => sas::generate_token_now(&resource_uri, key_name, key)?,
            Credential::Signature(token) => token.clone(),
        };

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(PublishError::Client)?;

        debug!(host = %connection.host, hub = %hub, "Opened event hub producer");

        Ok(Box::new(EventHubProducer {
            client,
            messages_url: format!(
                "{}/messages?timeout={}&api-version={}",
                resource_uri, SEND_TIMEOUT_SECS, API_VERSION
            ),
            authorization,
            hub,
        }))
    }
}

pub struct EventHubProducer {
    client: Client,
    messages_url: String,
    authorization: String,
    hub: String,
}

#[async_trait]
impl EventProducer for EventHubProducer {
    async fn send(&mut self, partition_key: &str, payload: &[u8]) -> Result<(), PublishError> {
        let broker_properties = serde_json::json!({ "PartitionKey": partition_key }).to_string();

        let response = self
            .client
            .post(&self.messages_url)
            .header(AUTHORIZATION, &self.authorization)
            .header("BrokerProperties", broker_properties)
            .header(CONTENT_TYPE, EVENT_CONTENT_TYPE)
            .body(payload.to_vec())
            .send()
            .await
            .map_err(PublishError::Transport)?;

        let status = response.status();
        if status.is_success() {
            debug!(hub = %self.hub, status = status.as_u16(), bytes = payload.len(), "Event accepted by event hub");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn close(self: Box<Self>) {
        let Self { client, hub, .. } = *self;
        // Dropping the client releases its connection pool.
        drop(client);
        debug!(hub = %hub, "Closed event hub producer");
    }
}
