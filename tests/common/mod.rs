// Shared helpers: a recording producer factory and router/request plumbing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use pipeline_ingest::services::{EventProducer, ProducerFactory, PublishError};
use pipeline_ingest::{create_router, AppState, Config, EventHubSettings};
use serde_json::Value;
use tower::ServiceExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Accept,
    FailConnect,
    RejectSend(u16),
}

#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub hub: String,
    pub partition_key: String,
    pub body: Value,
}

#[derive(Default)]
pub struct Recorded {
    pub events: Mutex<Vec<PublishedEvent>>,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
}

impl Recorded {
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn only_event(&self) -> PublishedEvent {
        let events = self.events();
        assert_eq!(events.len(), 1, "expected exactly one published event");
        events.into_iter().next().unwrap()
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct RecordingFactory {
    pub recorded: Arc<Recorded>,
    outcome: Outcome,
}

impl RecordingFactory {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            recorded: Arc::new(Recorded::default()),
            outcome,
        }
    }
}

struct RecordingProducer {
    recorded: Arc<Recorded>,
    hub: String,
    outcome: Outcome,
}

#[async_trait]
impl ProducerFactory for RecordingFactory {
    async fn connect(&self, settings: &EventHubSettings) -> Result<Box<dyn EventProducer>, PublishError> {
        if self.outcome == Outcome::FailConnect {
            return Err(PublishError::MissingCredential);
        }
        self.recorded.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(RecordingProducer {
            recorded: self.recorded.clone(),
            hub: settings.hub_name.clone(),
            outcome: self.outcome,
        }))
    }
}

#[async_trait]
impl EventProducer for RecordingProducer {
    async fn send(&mut self, partition_key: &str, payload: &[u8]) -> Result<(), PublishError> {
        if let Outcome::RejectSend(status) = self.outcome {
            return Err(PublishError::Rejected {
                status,
                body: "rejected by test".to_string(),
            });
        }
        let body = serde_json::from_slice(payload).expect("published payload is JSON");
        self.recorded.events.lock().unwrap().push(PublishedEvent {
            hub: self.hub.clone(),
            partition_key: partition_key.to_string(),
            body,
        });
        Ok(())
    }

    async fn close(self: Box<Self>) {
        self.recorded.closed.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.clone())
    })
    .expect("config")
}

/// Router backed by a recording factory; returns the recording handle too.
pub fn recording_app(outcome: Outcome) -> (Router, Arc<Recorded>) {
    recording_app_with(outcome, &[("EH__ConnectionString", "Endpoint=sb://ns.test/;SharedAccessSignature=sig")])
}

pub fn recording_app_with(outcome: Outcome, config: &[(&str, &str)]) -> (Router, Arc<Recorded>) {
    let factory = RecordingFactory::new(outcome);
    let recorded = factory.recorded.clone();
    let state = AppState::new(test_config(config), Arc::new(factory));
    (create_router(state), recorded)
}

pub async fn post(app: Router, path: &str, tenant: Option<&str>, body: impl Into<Body>) -> Response<Body> {
    let mut request = Request::builder().method("POST").uri(path);
    if let Some(tenant) = tenant {
        request = request.header("X-Tenant-Id", tenant);
    }
    app.oneshot(request.body(body.into()).unwrap()).await.unwrap()
}

pub async fn read_body(response: Response<Body>) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
