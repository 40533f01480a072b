use std::env;
use std::time::Duration;

/// Hub used when neither `EH__Name` nor an `EntityPath` names one.
pub const DEFAULT_HUB_NAME: &str = "eh-pipeline-status";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PUBLISH_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub eh_connection_string: Option<String>,
    pub eh_name: Option<String>,
    pub publish_timeout: Duration,
    pub json_logs: bool,
}

/// Destination for one publish, resolved from [`Config`] per invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct EventHubSettings {
    pub connection_string: Option<String>,
    pub hub_name: String,
    pub timeout: Duration,
}

// Keeps the credential out of logs.
impl std::fmt::Debug for EventHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHubSettings")
            .field("connection_string", &self.connection_string.as_ref().map(|_| "<redacted>"))
            .field("hub_name", &self.hub_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup so callers
    /// (tests included) never have to touch process state.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |keys: &[&str]| {
            keys.iter().find_map(|key| {
                lookup(*key)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            })
        };

        Ok(Self {
            host: value(&["HOST"]).unwrap_or_else(|| "0.0.0.0".to_string()),
            port: value(&["FUNCTIONS_CUSTOMHANDLER_PORT", "PORT"])
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            eh_connection_string: value(&["EH__ConnectionString", "EH:ConnectionString"]),
            eh_name: value(&["EH__Name", "EH:Name"]),
            publish_timeout: Duration::from_secs(
                value(&["EH__TimeoutSeconds"])
                    .and_then(|s| s.parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_PUBLISH_TIMEOUT_SECS),
            ),
            json_logs: value(&["LOG_FORMAT"])
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    pub fn event_hub(&self) -> EventHubSettings {
        EventHubSettings {
            connection_string: self.eh_connection_string.clone(),
            hub_name: self
                .eh_name
                .clone()
                .unwrap_or_else(|| DEFAULT_HUB_NAME.to_string()),
            timeout: self.publish_timeout,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
