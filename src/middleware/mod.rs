pub mod tenant;

pub use tenant::{TenantId, TENANT_HEADER, UNKNOWN_TENANT};
