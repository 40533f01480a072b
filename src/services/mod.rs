pub mod connection_string;
pub mod eventhub;
pub mod publisher;
pub mod sas;

pub use connection_string::{ConnectionString, ConnectionStringError, Credential};
pub use eventhub::{EventHubProducer, EventHubProducerFactory};
pub use publisher::{publish_once, EventProducer, ProducerFactory, PublishError, MAX_EVENT_BYTES};
