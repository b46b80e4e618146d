//! Stage classification from raw feed dates.

use jiff::Timestamp;

use crate::feed::parse_date;
use crate::model::StageStatus;

/// Classifies a stage against a moment, usually now.
///
/// An actual date that parses means completed. Otherwise a planned date
/// strictly before `now` means in progress. Anything else, including a
/// planned date that doesn't parse, is pending.
pub fn classify(actual_raw: &str, planned_raw: &str, now: Timestamp) -> StageStatus {
    if parse_date(actual_raw).is_some() {
        return StageStatus::Completed;
    }
    match parse_date(planned_raw) {
        Some(planned) => open_status(planned, now),
        None => StageStatus::Pending,
    }
}

/// Status of a stage with no actual date, given its planned date.
pub(super) fn open_status(planned: Timestamp, now: Timestamp) -> StageStatus {
    if planned < now {
        StageStatus::InProgress
    } else {
        StageStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::SignedDuration;

    #[test]
    fn actual_date_means_completed() {
        assert_eq!(classify("2024-01-05", "", Timestamp::now()), StageStatus::Completed);
        assert_eq!(classify("2024-01-05", "garbage", Timestamp::now()), StageStatus::Completed);
        assert_eq!(classify("05-Jan-24", "31-Dec-99", Timestamp::now()), StageStatus::Completed);
    }

    #[test]
    fn past_planned_date_means_in_progress() {
        let ten_days_ago = Timestamp::now() - SignedDuration::from_hours(240);
        let planned = ten_days_ago.to_string();
        assert_eq!(classify("", &planned, Timestamp::now()), StageStatus::InProgress);
    }

    #[test]
    fn future_or_missing_planned_date_means_pending() {
        let now: Timestamp = "2024-01-10T00:00:00Z".parse().unwrap();
        assert_eq!(classify("", "2024-01-12", now), StageStatus::Pending);
        assert_eq!(classify("", "", now), StageStatus::Pending);
        assert_eq!(classify("", "not a date", now), StageStatus::Pending);
        assert_eq!(classify("NA", "NA", now), StageStatus::Pending);
    }

    #[test]
    fn planned_exactly_now_is_still_pending() {
        let now: Timestamp = "2024-01-10T00:00:00Z".parse().unwrap();
        assert_eq!(classify("", "2024-01-10", now), StageStatus::Pending);
        assert_eq!(classify("", "2024-01-09", now), StageStatus::InProgress);
    }

    #[test]
    fn unparseable_actual_falls_through_to_planned() {
        let now: Timestamp = "2024-01-10T00:00:00Z".parse().unwrap();
        assert_eq!(classify("TBD", "2024-01-01", now), StageStatus::InProgress);
    }
}
