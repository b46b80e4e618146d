//! Timeline construction: one feed row becomes one shipment.

use jiff::Timestamp;
use tracing::debug;

use crate::feed::{FeedRow, Table, decode_rows, parse_date};
use crate::model::{Shipment, ShipmentStatus, StageKind, TimelineEntry, is_exception_flag};

use super::classify::classify;

const NOT_AVAILABLE: &str = "N/A";

/// Builds every shipment in a table, dropping rows that aren't shipments.
pub fn build_all(table: &Table) -> Vec<Shipment> {
    let now = Timestamp::now();
    let shipments: Vec<Shipment> = decode_rows(table)
        .iter()
        .filter_map(|row| build(row, now))
        .collect();
    debug!(
        rows = table.len(),
        shipments = shipments.len(),
        dropped = table.len() - shipments.len(),
        "built shipments from feed"
    );
    shipments
}

/// Builds a shipment from a feed row, classifying against a fixed moment.
///
/// Returns `None` for rows that carry no shipment: an empty scancode, or no
/// stage with a usable planned date. Those are blank or footer lines.
///
/// A stage without a parseable planned date is left out of the timeline
/// entirely, since it has nothing to order it by.
pub fn build(row: &FeedRow, now: Timestamp) -> Option<Shipment> {
    let scancode = row.scancode.trim();
    if scancode.is_empty() {
        return None;
    }

    let mut timeline: Vec<TimelineEntry> = StageKind::ALL
        .into_iter()
        .filter_map(|stage| {
            let cells = row.stage(stage);
            let planned_date = parse_date(&cells.guidance)?;
            Some(TimelineEntry {
                id: TimelineEntry::entry_id(scancode, stage),
                stage,
                status: classify(&cells.actual, &cells.guidance, now),
                planned_date,
                actual_date: parse_date(&cells.actual),
                remarks: cells.remarks.clone(),
            })
        })
        .collect();

    if timeline.is_empty() {
        debug!(scancode, "dropping row without any planned stage dates");
        return None;
    }

    timeline.sort_by_key(|e| e.planned_date);

    let exception = non_empty(&row.exception);
    let status = ShipmentStatus::derive(exception.as_deref(), &timeline);

    Some(Shipment {
        id: scancode.to_string(),
        scancode: scancode.to_string(),
        company: non_empty(&row.company).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        service_type: non_empty(&row.service_type).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        country: non_empty(&row.country),
        exception: exception.filter(|e| is_exception_flag(e)),
        status,
        timeline,
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
