//! Forward recalculation of planned dates.
//!
//! When the journey allocation changes, every stage that hasn't happened
//! yet gets a fresh planned date. Dates are laid out from an anchor: the
//! actual date of the latest completed stage, or the first stage's planned
//! date when nothing has completed. Each following stage lands its
//! allocated number of days after the one before it.

use jiff::{SignedDuration, Timestamp};

use crate::model::{JourneyNodeConfig, Shipment, ShipmentStatus, StageKind, StageStatus};

use super::classify::open_status;

/// Days given to a stage that the allocation doesn't mention.
const FALLBACK_DAYS: u32 = 1;

/// Recalculates a shipment's open stages from its anchor.
///
/// `now` decides whether a moved stage is in progress or still pending.
///
/// Entries up to and including the anchor keep their dates. With nothing
/// completed, the first entry is the anchor: its planned date is where the
/// journey starts, so recomputation begins at the second entry rather than
/// the first. Re-running with the same allocation gives the same result,
/// because the anchor only moves when a stage completes.
///
/// The timeline is not re-sorted. A stage that completed early can leave
/// the new dates earlier than the planned dates before it.
pub fn recalculate(
    shipment: &Shipment,
    allocation: &[JourneyNodeConfig],
    now: Timestamp,
) -> Shipment {
    let mut timeline = shipment.timeline.clone();

    let last_completed = timeline
        .iter()
        .rposition(|e| e.status == StageStatus::Completed);
    let (start, anchor) = match (last_completed, timeline.first()) {
        (Some(i), _) => {
            let entry = &timeline[i];
            (i + 1, entry.actual_date.unwrap_or(entry.planned_date))
        }
        (None, Some(first)) => (1, first.planned_date),
        (None, None) => return shipment.clone(),
    };

    let mut cursor = anchor;
    for entry in timeline.iter_mut().skip(start) {
        cursor = add_days(cursor, allocated_days(allocation, entry.stage));
        entry.planned_date = cursor;
        entry.status = open_status(cursor, now);
    }

    let status = ShipmentStatus::derive(shipment.exception.as_deref(), &timeline);

    Shipment {
        status,
        timeline,
        ..shipment.clone()
    }
}

fn allocated_days(allocation: &[JourneyNodeConfig], stage: StageKind) -> u32 {
    allocation
        .iter()
        .find(|n| n.node == stage)
        .map_or(FALLBACK_DAYS, |n| n.days)
}

fn add_days(ts: Timestamp, days: u32) -> Timestamp {
    ts.checked_add(SignedDuration::from_hours(24 * i64::from(days)))
        .unwrap_or(Timestamp::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{JourneyConfig, JourneyMode, TimelineEntry};

    const DAY: i64 = 86_400;

    fn day(n: i64) -> Timestamp {
        Timestamp::from_second(1_704_067_200 + n * DAY).unwrap()
    }

    fn now() -> Timestamp {
        day(4)
    }

    fn completed(stage: StageKind, planned: i64, actual: i64) -> TimelineEntry {
        TimelineEntry {
            id: TimelineEntry::entry_id("SC1", stage),
            stage,
            status: StageStatus::Completed,
            planned_date: day(planned),
            actual_date: Some(day(actual)),
            remarks: String::new(),
        }
    }

    fn open(stage: StageKind, planned: i64) -> TimelineEntry {
        TimelineEntry {
            id: TimelineEntry::entry_id("SC1", stage),
            stage,
            status: open_status(day(planned), now()),
            planned_date: day(planned),
            actual_date: None,
            remarks: String::new(),
        }
    }

    fn shipment(timeline: Vec<TimelineEntry>) -> Shipment {
        Shipment {
            id: "SC1".into(),
            scancode: "SC1".into(),
            company: "Acme".into(),
            service_type: "Express".into(),
            country: None,
            exception: None,
            status: ShipmentStatus::derive(None, &timeline),
            timeline,
        }
    }

    fn node(node: StageKind, days: u32) -> JourneyNodeConfig {
        JourneyNodeConfig { node, days }
    }

    #[test]
    fn lays_out_open_stages_from_last_actual_date() {
        let s = shipment(vec![
            completed(StageKind::Pickup, 0, 0),
            completed(StageKind::FlightOut, 2, 3),
            open(StageKind::Landed, 5),
            open(StageKind::ClearedAtDc, 6),
        ]);
        let allocation = [node(StageKind::Landed, 2), node(StageKind::ClearedAtDc, 1)];

        let out = recalculate(&s, &allocation, now());

        let anchor = day(3);
        assert_eq!(out.timeline[2].planned_date, anchor + SignedDuration::from_hours(48));
        assert_eq!(out.timeline[3].planned_date, anchor + SignedDuration::from_hours(72));
    }

    #[test]
    fn leaves_anchor_and_earlier_entries_alone() {
        let s = shipment(vec![
            completed(StageKind::Pickup, 0, 1),
            completed(StageKind::FlightOut, 2, 3),
            open(StageKind::Landed, 9),
        ]);
        let allocation = JourneyConfig::default();
        let out = recalculate(&s, allocation.allocation(JourneyMode::TenDay), now());

        assert_eq!(out.timeline[..2], s.timeline[..2]);
    }

    #[test]
    fn without_completion_anchors_at_first_planned_date() {
        let s = shipment(vec![
            open(StageKind::Pickup, 10),
            open(StageKind::FlightOut, 20),
            open(StageKind::Landed, 30),
        ]);
        let allocation = [
            node(StageKind::Pickup, 1),
            node(StageKind::FlightOut, 3),
            node(StageKind::Landed, 2),
        ];

        let out = recalculate(&s, &allocation, now());

        let planned: Vec<Timestamp> = out.timeline.iter().map(|e| e.planned_date).collect();
        assert_eq!(planned, [day(10), day(13), day(15)]);
    }

    #[test]
    fn unallocated_stage_gets_one_day() {
        let s = shipment(vec![
            completed(StageKind::Pickup, 0, 0),
            open(StageKind::FlightOut, 5),
        ]);
        let out = recalculate(&s, &[], now());
        assert_eq!(out.timeline[1].planned_date, day(1));
    }

    #[test]
    fn reclassifies_open_stages_against_new_dates() {
        let s = shipment(vec![
            completed(StageKind::Pickup, 0, 0),
            open(StageKind::FlightOut, 9),
            open(StageKind::Landed, 10),
        ]);
        assert_eq!(s.timeline[1].status, StageStatus::Pending);

        let allocation = [node(StageKind::FlightOut, 1), node(StageKind::Landed, 5)];
        let out = recalculate(&s, &allocation, now());

        assert_eq!(out.timeline[1].status, StageStatus::InProgress);
        assert_eq!(out.timeline[2].status, StageStatus::Pending);
        assert!(out.timeline[1].actual_date.is_none());
    }

    #[test]
    fn is_idempotent() {
        let shipments = [
            shipment(vec![
                completed(StageKind::Pickup, 0, 0),
                completed(StageKind::FlightOut, 2, 3),
                open(StageKind::Landed, 5),
                open(StageKind::Delivery, 6),
            ]),
            shipment(vec![open(StageKind::Pickup, 3), open(StageKind::Landed, 8)]),
            shipment(vec![completed(StageKind::Pickup, 0, 2)]),
        ];
        let config = JourneyConfig::default();

        for mode in JourneyMode::ALL {
            let allocation = config.allocation(mode);
            for s in &shipments {
                let once = recalculate(s, allocation, now());
                let twice = recalculate(&once, allocation, now());
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn shifting_open_stages_does_not_change_delay() {
        let late = shipment(vec![
            completed(StageKind::Pickup, 0, 2),
            open(StageKind::Delivery, 9),
        ]);
        assert_eq!(late.status, ShipmentStatus::Delayed);
        let out = recalculate(&late, &[node(StageKind::Delivery, 30)], now());
        assert_eq!(out.status, ShipmentStatus::Delayed);

        let on_time = shipment(vec![
            completed(StageKind::Pickup, 2, 1),
            open(StageKind::Delivery, 9),
        ]);
        let out = recalculate(&on_time, &[node(StageKind::Delivery, 0)], now());
        assert_eq!(out.status, ShipmentStatus::OnTime);
    }

    #[test]
    fn exception_is_carried_over() {
        let mut s = shipment(vec![
            completed(StageKind::Pickup, 0, 0),
            open(StageKind::Delivery, 9),
        ]);
        s.exception = Some("Customs hold".into());
        s.status = ShipmentStatus::Exception;

        let out = recalculate(&s, &[], now());
        assert_eq!(out.status, ShipmentStatus::Exception);
        assert_eq!(out.exception, s.exception);
    }

    #[test]
    fn fully_completed_shipment_is_untouched() {
        let s = shipment(vec![
            completed(StageKind::Pickup, 0, 0),
            completed(StageKind::Delivery, 5, 6),
        ]);
        let out = recalculate(&s, &[], now());
        assert_eq!(out, s);
        assert_eq!(out.status, ShipmentStatus::Delivered);
    }

    #[test]
    fn early_completion_keeps_entry_order() {
        let s = shipment(vec![
            completed(StageKind::Pickup, 10, 3),
            open(StageKind::FlightOut, 12),
        ]);

        let out = recalculate(&s, &[node(StageKind::FlightOut, 2)], now());

        let stages: Vec<StageKind> = out.timeline.iter().map(|e| e.stage).collect();
        assert_eq!(stages, [StageKind::Pickup, StageKind::FlightOut]);
        assert_eq!(out.timeline[1].planned_date, day(5));
        assert!(out.timeline[1].planned_date < out.timeline[0].planned_date);
    }
}
