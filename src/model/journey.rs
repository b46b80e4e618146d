//! Journey types: modes and per-stage day allocations.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::StageKind;

/// A target total transit time, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum JourneyMode {
    TenDay,
    TwelveDay,
    FifteenDay,
}

impl JourneyMode {
    pub const ALL: [JourneyMode; 3] = [Self::TenDay, Self::TwelveDay, Self::FifteenDay];

    /// Total days the mode allows.
    pub fn days(self) -> u32 {
        match self {
            Self::TenDay => 10,
            Self::TwelveDay => 12,
            Self::FifteenDay => 15,
        }
    }
}

impl TryFrom<u32> for JourneyMode {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|m| m.days() == days)
            .ok_or_else(|| format!("unsupported journey mode: {days} (expected 10, 12 or 15)"))
    }
}

impl From<JourneyMode> for u32 {
    fn from(mode: JourneyMode) -> Self {
        mode.days()
    }
}

impl fmt::Display for JourneyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-day", self.days())
    }
}

/// Days allocated to traversing one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyNodeConfig {
    pub node: StageKind,
    pub days: u32,
}

/// Day allocations for every journey mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyConfig {
    modes: BTreeMap<JourneyMode, Vec<JourneyNodeConfig>>,
}

impl JourneyConfig {
    /// The allocation for a mode, in journey order.
    pub fn allocation(&self, mode: JourneyMode) -> &[JourneyNodeConfig] {
        self.modes.get(&mode).map_or(&[], Vec::as_slice)
    }

    /// Replaces the allocation for a mode. Validation is the caller's job.
    pub(crate) fn set_allocation(&mut self, mode: JourneyMode, nodes: Vec<JourneyNodeConfig>) {
        self.modes.insert(mode, nodes);
    }

    /// All modes with their allocations, in mode order.
    pub fn iter(&self) -> impl Iterator<Item = (JourneyMode, &[JourneyNodeConfig])> {
        self.modes.iter().map(|(m, nodes)| (*m, nodes.as_slice()))
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        let table: [(JourneyMode, [u32; 6]); 3] = [
            (JourneyMode::TenDay, [1, 3, 2, 2, 1, 1]),
            (JourneyMode::TwelveDay, [2, 3, 2, 2, 2, 1]),
            (JourneyMode::FifteenDay, [2, 4, 3, 3, 2, 1]),
        ];
        let modes = table
            .into_iter()
            .map(|(mode, days)| {
                let nodes = StageKind::ALL
                    .into_iter()
                    .zip(days)
                    .map(|(node, days)| JourneyNodeConfig { node, days })
                    .collect();
                (mode, nodes)
            })
            .collect();
        Self { modes }
    }
}

/// Total days across an allocation.
///
/// Summed as `u64` so no combination of per-stage days can wrap.
pub fn total_days(nodes: &[JourneyNodeConfig]) -> u64 {
    nodes.iter().map(|n| u64::from(n.days)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allocations_sum_to_their_mode() {
        let config = JourneyConfig::default();
        for mode in JourneyMode::ALL {
            let nodes = config.allocation(mode);
            assert_eq!(nodes.len(), StageKind::ALL.len());
            assert_eq!(total_days(nodes), u64::from(mode.days()), "{mode}");
        }
    }

    #[test]
    fn default_allocations_follow_journey_order() {
        let config = JourneyConfig::default();
        for (_, nodes) in config.iter() {
            let stages: Vec<StageKind> = nodes.iter().map(|n| n.node).collect();
            assert_eq!(stages, StageKind::ALL);
        }
    }

    #[test]
    fn mode_round_trips_through_integer() {
        assert_eq!(JourneyMode::try_from(12), Ok(JourneyMode::TwelveDay));
        assert!(JourneyMode::try_from(11).is_err());
        let json = serde_json::to_string(&JourneyMode::FifteenDay).unwrap();
        assert_eq!(json, "15");
        let mode: JourneyMode = serde_json::from_str("10").unwrap();
        assert_eq!(mode, JourneyMode::TenDay);
    }
}
