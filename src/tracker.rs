//! The tracker: shipments plus the journey store that shapes them.
//!
//! All mutation goes through `&mut self`, so a reader can never see a
//! shipment list halfway through a refresh or a recalculation pass.
//! Each pass builds a complete new list and swaps it in.

use jiff::Timestamp;
use tracing::{info, warn};

use crate::feed::{FeedSource, FetchError, Table};
use crate::journey::{JourneyError, JourneyStore};
use crate::model::{JourneyMode, JourneyNodeConfig, Shipment};
use crate::timeline;

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    journey: JourneyStore,
    shipments: Vec<Shipment>,
    refreshed_at: Option<Timestamp>,
}

impl Tracker {
    pub fn new(
        journey: JourneyStore,
        shipments: Vec<Shipment>,
        refreshed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            journey,
            shipments,
            refreshed_at,
        }
    }

    pub fn journey(&self) -> &JourneyStore {
        &self.journey
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn shipment(&self, id: &str) -> Option<&Shipment> {
        self.shipments.iter().find(|s| s.id == id)
    }

    /// When the shipment list last came from a successful refresh.
    pub fn refreshed_at(&self) -> Option<Timestamp> {
        self.refreshed_at
    }

    /// Fetches the feed and rebuilds every shipment from it.
    ///
    /// On failure the current list stays exactly as it was and the error is
    /// returned. Returns the number of shipments on success.
    pub fn refresh(&mut self, source: &dyn FeedSource) -> Result<usize, FetchError> {
        let raw = source.fetch().inspect_err(|e| {
            warn!(source = %source.describe(), error = %e, "refresh failed; keeping previous shipments");
        })?;

        let table = Table::parse(&raw);
        if table.is_empty() {
            warn!(source = %source.describe(), "feed has no data rows");
        }
        let shipments = timeline::build_all(&table);
        info!(source = %source.describe(), shipments = shipments.len(), "refreshed shipments");

        self.shipments = shipments;
        self.refreshed_at = Some(Timestamp::now());
        Ok(self.shipments.len())
    }

    /// Switches journey mode and recalculates if it changed.
    pub fn set_active_mode(&mut self, mode: JourneyMode) -> bool {
        let changed = self.journey.set_active_mode(mode);
        if changed {
            self.recalculate_all();
        }
        changed
    }

    /// Saves an allocation for the active mode and recalculates.
    ///
    /// A rejected allocation changes nothing and recalculates nothing.
    pub fn save_allocation(&mut self, candidate: Vec<JourneyNodeConfig>) -> Result<(), JourneyError> {
        self.journey.save(candidate)?;
        self.recalculate_all();
        Ok(())
    }

    fn recalculate_all(&mut self) {
        let now = Timestamp::now();
        let allocation = self.journey.active_allocation();
        let recalculated: Vec<Shipment> = self
            .shipments
            .iter()
            .map(|s| timeline::recalculate(s, allocation, now))
            .collect();
        info!(
            mode = %self.journey.active_mode(),
            shipments = recalculated.len(),
            "recalculated planned dates"
        );
        self.shipments = recalculated;
    }
}
