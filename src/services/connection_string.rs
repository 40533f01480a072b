//! Event Hubs connection strings.
//!
//! Accepted form: `;`-separated `Key=Value` pairs, keys matched
//! case-insensitively:
//!
//! ```text
//! Endpoint=sb://<namespace>.servicebus.windows.net/;SharedAccessKeyName=<name>;SharedAccessKey=<key>[;EntityPath=<hub>]
//! Endpoint=sb://<namespace>/;SharedAccessSignature=SharedAccessSignature sr=...[;EntityPath=<hub>]
//! Endpoint=sb://localhost;...;UseDevelopmentEmulator=true
//! ```

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("connection string is missing {0}")]
    MissingField(&'static str),
    #[error("connection string segment {0} is not a Key=Value pair")]
    MalformedSegment(usize),
    #[error("endpoint has no host")]
    EmptyEndpoint,
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    SharedKey { key_name: String, key: String },
    /// A pre-issued `SharedAccessSignature sr=...` token.
    Signature(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub host: String,
    pub credential: Credential,
    pub entity_path: Option<String>,
    pub use_emulator: bool,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self, ConnectionStringError> {
        let mut endpoint = None;
        let mut key_name = None;
        let mut key = None;
        let mut signature = None;
        let mut entity_path = None;
        let mut use_emulator = false;

        for (index, segment) in raw.split(';').enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (name, value) = segment
                .split_once('=')
                .ok_or(ConnectionStringError::MalformedSegment(index))?;
            let value = value.trim().to_string();

            match name.trim().to_ascii_lowercase().as_str() {
                "endpoint" => endpoint = Some(value),
                "sharedaccesskeyname" => key_name = Some(value),
                "sharedaccesskey" => key = Some(value),
                "sharedaccesssignature" => signature = Some(value),
                "entitypath" => entity_path = Some(value).filter(|v| !v.is_empty()),
                "usedevelopmentemulator" => use_emulator = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }

        let endpoint = endpoint.ok_or(ConnectionStringError::MissingField("Endpoint"))?;
        let host = strip_scheme(&endpoint).trim_end_matches('/').to_string();
        if host.is_empty() {
            return Err(ConnectionStringError::EmptyEndpoint);
        }

        let credential = match (signature, key_name, key) {
            (Some(token), _, _) => Credential::Signature(token),
            (None, Some(key_name), Some(key)) => Credential::SharedKey { key_name, key },
            (None, None, _) => return Err(ConnectionStringError::MissingField("SharedAccessKeyName")),
            (None, Some(_), None) => return Err(ConnectionStringError::MissingField("SharedAccessKey")),
        };

        Ok(Self {
            host,
            credential,
            entity_path,
            use_emulator,
        })
    }

    /// `EntityPath` names the hub for hub-level strings; otherwise the
    /// configured name is used.
    pub fn hub_name<'a>(&'a self, configured: &'a str) -> &'a str {
        self.entity_path.as_deref().unwrap_or(configured)
    }

    pub fn base_url(&self) -> String {
        let scheme = if self.use_emulator { "http" } else { "https" };
        format!("{}://{}", scheme, self.host)
    }
}

fn strip_scheme(endpoint: &str) -> &str {
    endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(endpoint)
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SharedKey { key_name, .. } => f
                .debug_struct("SharedKey")
                .field("key_name", key_name)
                .field("key", &"<redacted>")
                .finish(),
            Self::Signature(_) => f.debug_tuple("Signature").field(&"<redacted>").finish(),
        }
    }
}

impl std::fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionString")
            .field("host", &self.host)
            .field("credential", &self.credential)
            .field("entity_path", &self.entity_path)
            .field("use_emulator", &self.use_emulator)
            .finish()
    }
}
