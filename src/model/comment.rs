//! Comment types: user-authored notes scoped to a timeline entry.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment on one stage of one shipment.
///
/// Comments are annotations only. They never affect status or dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub shipment_id: String,
    pub entry_id: String,
    pub author: String,
    pub body: String,
    pub created_at: Timestamp,
}
