//! Stage types: the fixed journey sequence and per-stage status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A position in the fixed journey sequence.
///
/// Every shipment travels the same stages in the same order.
/// Declaration order is the journey order, so `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    /// Picked up at origin.
    Pickup,
    FlightOut,
    Landed,
    /// Cleared customs at the distribution center.
    ClearedAtDc,
    /// Handed to the last-mile carrier.
    Injection,
    Delivery,
}

impl StageKind {
    /// All stages in journey order.
    pub const ALL: [StageKind; 6] = [
        Self::Pickup,
        Self::FlightOut,
        Self::Landed,
        Self::ClearedAtDc,
        Self::Injection,
        Self::Delivery,
    ];

    /// Zero-based position in the journey.
    pub fn index(self) -> usize {
        match self {
            Self::Pickup => 0,
            Self::FlightOut => 1,
            Self::Landed => 2,
            Self::ClearedAtDc => 3,
            Self::Injection => 4,
            Self::Delivery => 5,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pickup => "Pickup",
            Self::FlightOut => "Flight-out",
            Self::Landed => "Landed",
            Self::ClearedAtDc => "Cleared at DC",
            Self::Injection => "Injection",
            Self::Delivery => "Delivery",
        }
    }

    /// Kebab-case slug, as used in config files and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::FlightOut => "flight-out",
            Self::Landed => "landed",
            Self::ClearedAtDc => "cleared-at-dc",
            Self::Injection => "injection",
            Self::Delivery => "delivery",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StageKind {
    type Err = String;

    /// Accepts either the label or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| s.eq_ignore_ascii_case(k.label()) || s.eq_ignore_ascii_case(k.slug()))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.slug()).collect();
                format!("unknown stage '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Where a single stage stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    /// Not reached yet: the planned date is still ahead (or unknown).
    Pending,

    /// Planned date has passed but no actual date is recorded.
    InProgress,

    /// An actual date is recorded.
    Completed,
}

impl StageStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, stage) in StageKind::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn parses_label_and_slug() {
        assert_eq!("Cleared at DC".parse::<StageKind>(), Ok(StageKind::ClearedAtDc));
        assert_eq!("cleared-at-dc".parse::<StageKind>(), Ok(StageKind::ClearedAtDc));
        assert_eq!("FLIGHT-OUT".parse::<StageKind>(), Ok(StageKind::FlightOut));
        assert_eq!(" delivery ".parse::<StageKind>(), Ok(StageKind::Delivery));
    }

    #[test]
    fn rejects_unknown_stage() {
        let err = "teleport".parse::<StageKind>().unwrap_err();
        assert!(err.contains("teleport"));
        assert!(err.contains("flight-out"));
    }

    #[test]
    fn serializes_as_slug() {
        let json = serde_json::to_string(&StageKind::ClearedAtDc).unwrap();
        assert_eq!(json, "\"cleared-at-dc\"");
        let status = serde_json::to_string(&StageStatus::InProgress).unwrap();
        assert_eq!(status, "\"in-progress\"");
    }
}
