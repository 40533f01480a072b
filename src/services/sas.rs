//! Shared Access Signature tokens for Event Hubs REST calls.

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::publisher::PublishError;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a generated token. One token signs exactly one publish.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Build `SharedAccessSignature sr=..&sig=..&se=..&skn=..` for `resource_uri`,
/// valid until `expiry` (Unix seconds).
pub fn generate_token(
    resource_uri: &str,
    key_name: &str,
    key: &str,
    expiry: i64,
) -> Result<String, PublishError> {
    let encoded_uri = urlencoding::encode(resource_uri);
    let string_to_sign = format!("{}\n{}", encoded_uri, expiry);

    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| PublishError::Signing(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

    Ok(format!(
        "SharedAccessSignature sr={}&sig={}&se={}&skn={}",
        encoded_uri,
        urlencoding::encode(&signature),
        expiry,
        urlencoding::encode(key_name),
    ))
}

pub fn generate_token_now(resource_uri: &str, key_name: &str, key: &str) -> Result<String, PublishError> {
    generate_token(resource_uri, key_name, key, Utc::now().timestamp() + TOKEN_TTL_SECS)
}
