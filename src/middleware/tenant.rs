use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Tenant used when the request carries no `X-Tenant-Id` header.
pub const UNKNOWN_TENANT: &str = "unknown";

/// Tenant identity of a request; doubles as the partition key.
///
/// Taken verbatim from the first `X-Tenant-Id` header, including the empty
/// string. Never rejects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let tenant = headers
            .get(TENANT_HEADER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_else(|| UNKNOWN_TENANT.to_string());
        Self(tenant)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
