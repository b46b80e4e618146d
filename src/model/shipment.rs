//! Shipment types: the aggregate root and its stage timeline.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{StageKind, StageStatus};

const SECONDS_PER_DAY: i64 = 86_400;

/// One shipment's occurrence of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Unique within the shipment: `<scancode>-stage-<index>`.
    /// Also the scope key for comment threads.
    pub id: String,
    pub stage: StageKind,
    pub status: StageStatus,
    pub planned_date: Timestamp,

    /// Present iff `status` is `Completed`.
    pub actual_date: Option<Timestamp>,

    /// Free-text remarks carried over from the feed.
    pub remarks: String,
}

impl TimelineEntry {
    /// Builds the stable entry id for a stage of a shipment.
    pub fn entry_id(scancode: &str, stage: StageKind) -> String {
        format!("{scancode}-stage-{}", stage.index())
    }

    /// Whether the stage completed strictly after its planned date.
    pub fn is_delayed(&self) -> bool {
        self.actual_date.is_some_and(|actual| actual > self.planned_date)
    }

    /// Whole days the stage finished late. Zero when on time or not completed.
    pub fn delay_days(&self) -> u64 {
        let Some(actual) = self.actual_date else {
            return 0;
        };
        let days = actual.duration_since(self.planned_date).as_secs() / SECONDS_PER_DAY;
        u64::try_from(days).unwrap_or(0)
    }
}

/// Overall status of a shipment, derived from its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    #[serde(rename = "On-Time")]
    OnTime,
    Delayed,
    Delivered,
    Exception,
}

impl ShipmentStatus {
    /// Derives a shipment's status from its exception flag and timeline.
    ///
    /// Precedence: exception, then delivered (every stage completed),
    /// then delayed (any completed stage late), then on-time.
    /// Delay is only judged where an actual date exists.
    pub fn derive(exception: Option<&str>, timeline: &[TimelineEntry]) -> Self {
        if exception.is_some_and(is_exception_flag) {
            return Self::Exception;
        }
        if !timeline.is_empty()
            && timeline
                .iter()
                .all(|e| e.status == StageStatus::Completed)
        {
            return Self::Delivered;
        }
        if timeline.iter().any(TimelineEntry::is_delayed) {
            return Self::Delayed;
        }
        Self::OnTime
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OnTime => "On-Time",
            Self::Delayed => "Delayed",
            Self::Delivered => "Delivered",
            Self::Exception => "Exception",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether an exception field value raises the exception flag.
///
/// Feeds write `FALSE` (or leave the cell blank) when nothing is wrong.
pub fn is_exception_flag(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !value.eq_ignore_ascii_case("false")
}

/// A tracked shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// The scancode, which doubles as the shipment id.
    pub id: String,
    pub scancode: String,
    pub company: String,
    pub service_type: String,
    pub country: Option<String>,
    pub exception: Option<String>,
    pub status: ShipmentStatus,

    /// One entry per stage present in the feed, ordered by planned date.
    pub timeline: Vec<TimelineEntry>,
}

impl Shipment {
    /// Sum of positive per-stage delays over completed entries.
    pub fn total_delay_days(&self) -> u64 {
        self.timeline.iter().map(TimelineEntry::delay_days).sum()
    }

    /// Looks up an entry by stage.
    pub fn entry(&self, stage: StageKind) -> Option<&TimelineEntry> {
        self.timeline.iter().find(|e| e.stage == stage)
    }
}
