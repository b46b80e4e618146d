//! Core data model for shiptrack.
//!
//! These types represent the tracked world:
//! stages, shipments and their timelines, journey allocations, and comments.

mod comment;
mod journey;
mod shipment;
mod stage;

pub use comment::Comment;
pub use journey::{JourneyConfig, JourneyMode, JourneyNodeConfig, total_days};
pub use shipment::{Shipment, ShipmentStatus, TimelineEntry, is_exception_flag};
pub use stage::{StageKind, StageStatus};
