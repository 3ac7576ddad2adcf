use crate::domain::types::RecordId;

pub mod equipment;
pub mod lookup;
pub mod movement;
pub mod order_service;
pub mod types;

/// Anything listed in a table: records are opaque beyond a stable identifier.
pub trait Record {
    fn record_id(&self) -> &RecordId;
}
