pub mod inventory_event;
pub mod payload;
pub mod pipeline_status_event;

pub use inventory_event::InventoryEvent;
pub use payload::InboundPayload;
pub use pipeline_status_event::PipelineStatusEvent;
