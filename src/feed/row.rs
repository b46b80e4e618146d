//! Typed feed rows.
//!
//! The feed's column names are fixed domain knowledge, recorded once in
//! [`STAGE_COLUMNS`] and the identity column constants below. A table's
//! header is resolved against them a single time; rows then decode by
//! position into [`FeedRow`] without any further string-keyed lookups.

use tracing::warn;

use crate::model::StageKind;

use super::table::{Row, Table};

const SCANCODE: &str = "scancode";
const COMPANY: &str = "company";
const SERVICE_TYPE: &str = "Service_type";
const COUNTRY: &str = "Country";
const EXCEPTION: &str = "Exception";

/// Feed column names for one stage, after header normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageColumns {
    pub stage: StageKind,
    pub guidance: &'static str,
    pub actual: &'static str,
    pub remarks: &'static str,
}

/// Where each stage's dates and remarks live in the feed.
///
/// `Actal_At_origin` is spelled the way the feed spells it.
pub const STAGE_COLUMNS: [StageColumns; 6] = [
    StageColumns {
        stage: StageKind::Pickup,
        guidance: "Guidance_At_origin",
        actual: "Actal_At_origin",
        remarks: "Remarks",
    },
    StageColumns {
        stage: StageKind::FlightOut,
        guidance: "Guidance_Flightout",
        actual: "Actual_Flyout",
        remarks: "Remarks_1",
    },
    StageColumns {
        stage: StageKind::Landed,
        guidance: "Guidance_Landed",
        actual: "Actual_Landed",
        remarks: "Remarks_2",
    },
    StageColumns {
        stage: StageKind::ClearedAtDc,
        guidance: "Guidance_Cleared_at_DC",
        actual: "Actual_Cleared_at_DC",
        remarks: "Remarks_and_logs",
    },
    StageColumns {
        stage: StageKind::Injection,
        guidance: "Guidance_Injection",
        actual: "Actual_injection",
        remarks: "Remarks_3",
    },
    StageColumns {
        stage: StageKind::Delivery,
        guidance: "Guidance_Delivery",
        actual: "Actual_Delivery",
        remarks: "Remarks_4",
    },
];

/// Raw cells for one stage of one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageCells {
    pub guidance: String,
    pub actual: String,
    pub remarks: String,
}

/// One feed row with every field the timeline builder consumes.
///
/// Values are raw strings: date interpretation happens later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRow {
    pub scancode: String,
    pub company: String,
    pub service_type: String,
    pub country: String,
    pub exception: String,

    /// Indexed by [`StageKind::index`].
    pub stages: [StageCells; 6],
}

impl FeedRow {
    pub fn stage(&self, stage: StageKind) -> &StageCells {
        &self.stages[stage.index()]
    }
}

/// Header positions of every consumed column, resolved once per table.
#[derive(Debug, Clone)]
pub struct Columns {
    scancode: Option<usize>,
    company: Option<usize>,
    service_type: Option<usize>,
    country: Option<usize>,
    exception: Option<usize>,
    stages: [[Option<usize>; 3]; 6],
}

impl Columns {
    /// Resolves the known column names against a table's header.
    ///
    /// Missing columns are logged and decode as empty cells.
    pub fn resolve(table: &Table) -> Self {
        let mut missing = Vec::new();
        let mut find = |name: &'static str| {
            let index = table.column(name);
            if index.is_none() {
                missing.push(name);
            }
            index
        };

        let scancode = find(SCANCODE);
        let company = find(COMPANY);
        let service_type = find(SERVICE_TYPE);
        let country = find(COUNTRY);
        let exception = find(EXCEPTION);
        let stages = STAGE_COLUMNS.map(|c| [find(c.guidance), find(c.actual), find(c.remarks)]);

        if !missing.is_empty() {
            warn!(
                columns = ?missing,
                header = ?table.headers(),
                "feed header is missing expected columns"
            );
        }

        Self {
            scancode,
            company,
            service_type,
            country,
            exception,
            stages,
        }
    }

    /// Decodes one row by column position.
    pub fn decode(&self, row: Row<'_>) -> FeedRow {
        let cell = |index: Option<usize>| index.map_or_else(String::new, |i| row.at(i).to_string());

        FeedRow {
            scancode: cell(self.scancode),
            company: cell(self.company),
            service_type: cell(self.service_type),
            country: cell(self.country),
            exception: cell(self.exception),
            stages: self.stages.map(|[guidance, actual, remarks]| StageCells {
                guidance: cell(guidance),
                actual: cell(actual),
                remarks: cell(remarks),
            }),
        }
    }
}

/// Decodes every row of a table.
pub fn decode_rows(table: &Table) -> Vec<FeedRow> {
    let columns = Columns::resolve(table);
    table.rows().map(|row| columns.decode(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_columns_follow_journey_order() {
        let stages: Vec<StageKind> = STAGE_COLUMNS.iter().map(|c| c.stage).collect();
        assert_eq!(stages, StageKind::ALL);
    }

    #[test]
    fn decodes_known_columns_by_name() {
        let raw = "\
group,,,,,
scancode,company,Service type,Guidance Landed,Actual Landed,Remarks (2),Unrelated
SC9,Acme,Express,05-Jan-24,06-Jan-24,late truck,ignored
";
        let table = Table::parse(raw);
        let rows = decode_rows(&table);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.scancode, "SC9");
        assert_eq!(row.company, "Acme");
        assert_eq!(row.service_type, "Express");
        assert_eq!(row.country, "");
        assert_eq!(row.exception, "");

        let landed = row.stage(StageKind::Landed);
        assert_eq!(landed.guidance, "05-Jan-24");
        assert_eq!(landed.actual, "06-Jan-24");
        assert_eq!(landed.remarks, "late truck");
        assert_eq!(row.stage(StageKind::Pickup), &StageCells::default());
    }

    #[test]
    fn column_order_does_not_matter() {
        let raw = "\
group
Exception,Country,scancode
Customs hold,NZ,SC1
";
        let rows = decode_rows(&Table::parse(raw));
        assert_eq!(rows[0].scancode, "SC1");
        assert_eq!(rows[0].country, "NZ");
        assert_eq!(rows[0].exception, "Customs hold");
    }
}
