pub mod health;
pub mod inventory;
pub mod pipeline_status;

pub use health::health_check;
pub use inventory::{ingest_inventory, ENQUEUE_FAILED};
pub use pipeline_status::ingest_pipeline_status;
