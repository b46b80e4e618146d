//! Journey configuration store.
//!
//! Holds the day allocation for every journey mode and which mode is
//! active. The only way in is through [`JourneyStore::save`] and
//! [`JourneyStore::set_active_mode`]; a save that fails validation leaves
//! the store exactly as it was.

use tracing::{info, warn};

use crate::model::{JourneyConfig, JourneyMode, JourneyNodeConfig, StageKind, total_days};

/// Reasons a candidate allocation is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    #[error("total days must sum up to {expected} for the {mode} mode; current total is {actual}")]
    Rejected {
        mode: JourneyMode,
        expected: u32,
        actual: u64,
    },

    #[error("stage {0} is allocated more than once")]
    DuplicateStage(StageKind),
}

/// Checks an allocation against a mode.
///
/// Each stage may appear at most once, and the days must add up to the
/// mode's total exactly. Stages left out fall back to a default allocation
/// during recalculation.
pub fn validate(mode: JourneyMode, nodes: &[JourneyNodeConfig]) -> Result<(), JourneyError> {
    for (i, node) in nodes.iter().enumerate() {
        if nodes[..i].iter().any(|n| n.node == node.node) {
            return Err(JourneyError::DuplicateStage(node.node));
        }
    }

    let actual = total_days(nodes);
    if actual != u64::from(mode.days()) {
        return Err(JourneyError::Rejected {
            mode,
            expected: mode.days(),
            actual,
        });
    }
    Ok(())
}

/// Day allocations plus the active mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyStore {
    config: JourneyConfig,
    active: JourneyMode,
}

impl Default for JourneyStore {
    fn default() -> Self {
        Self {
            config: JourneyConfig::default(),
            active: JourneyMode::TenDay,
        }
    }
}

impl JourneyStore {
    pub fn new(config: JourneyConfig, active: JourneyMode) -> Self {
        Self { config, active }
    }

    /// The full configuration and the active mode.
    pub fn get(&self) -> (&JourneyConfig, JourneyMode) {
        (&self.config, self.active)
    }

    pub fn active_mode(&self) -> JourneyMode {
        self.active
    }

    /// The allocation that recalculation should use right now.
    pub fn active_allocation(&self) -> &[JourneyNodeConfig] {
        self.config.allocation(self.active)
    }

    /// Switches the active mode. Returns whether anything changed.
    pub fn set_active_mode(&mut self, mode: JourneyMode) -> bool {
        if self.active == mode {
            return false;
        }
        info!(from = %self.active, to = %mode, "switching journey mode");
        self.active = mode;
        true
    }

    /// Replaces the active mode's allocation if it validates.
    pub fn save(&mut self, candidate: Vec<JourneyNodeConfig>) -> Result<(), JourneyError> {
        if let Err(e) = validate(self.active, &candidate) {
            warn!(mode = %self.active, error = %e, "rejected journey allocation");
            return Err(e);
        }
        info!(mode = %self.active, "saved journey allocation");
        self.config.set_allocation(self.active, candidate);
        Ok(())
    }
}
