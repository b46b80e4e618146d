//! Tabular parsing: raw delimited text into header-keyed rows.
//!
//! The feed carries two header lines. The first groups columns into
//! categories and is ignored. The second names the fields. Every line
//! after that is a data row, split positionally.

/// A parsed feed: normalized field names and positional rows.
///
/// Every row has exactly as many values as there are headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses raw comma-delimited text.
    ///
    /// Lines are split first and each is decoded on its own, so quoting
    /// never reaches past the end of a line.
    ///
    /// Never fails: blank lines are dropped, short rows are padded with empty
    /// strings, and input with fewer than three non-blank lines yields an
    /// empty table.
    pub fn parse(raw: &str) -> Self {
        let lines: Vec<Vec<String>> = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(split_line)
            .collect();

        if lines.len() < 3 {
            return Self::default();
        }

        let mut lines = lines.into_iter().skip(1);
        let headers: Vec<String> = lines
            .next()
            .unwrap_or_default()
            .iter()
            .map(|h| normalize_header(h))
            .collect();

        let rows = lines
            .map(|mut values| {
                values.resize(headers.len(), String::new());
                values
            })
            .collect();

        Self { headers, rows }
    }

    /// Normalized field names, in column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of a field, if the header names it.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows, in feed order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row { values })
    }
}

/// One data row. Field names resolve to positions through [`Table::column`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    values: &'a [String],
}

impl<'a> Row<'a> {
    /// The raw value at a column position. Empty when out of range.
    pub fn at(&self, index: usize) -> &'a str {
        self.values.get(index).map_or("", String::as_str)
    }
}

/// Normalizes a header cell into a stable lookup key.
///
/// Whitespace runs become `_` and parentheses are dropped,
/// so `"Remarks (1)"` becomes `"Remarks_1"`.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['(', ')'], "")
}

/// Splits one line into trimmed values, honoring quoted commas.
///
/// An unterminated quote runs to the end of the line.
fn split_line(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    reader
        .records()
        .flatten()
        .next()
        .map(|record| record.iter().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(table: &Table, row: Row<'a>, name: &str) -> &'a str {
        table.column(name).map_or("", |i| row.at(i))
    }

    const FEED: &str = "\
Shipment,,Origin,
scancode,company,Guidance At origin,Remarks (1)
SC1,Acme,05-Jan-24,first
SC2,Globex
";

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header("Guidance At origin"), "Guidance_At_origin");
        assert_eq!(normalize_header("  Service   type "), "Service_type");
        assert_eq!(normalize_header("Remarks (1)"), "Remarks_1");
    }

    #[test]
    fn skips_grouping_header_and_keys_by_field_names() {
        let table = Table::parse(FEED);
        assert_eq!(
            table.headers(),
            ["scancode", "company", "Guidance_At_origin", "Remarks_1"]
        );
        assert_eq!(table.len(), 2);

        let first = table.rows().next().unwrap();
        assert_eq!(field(&table, first, "scancode"), "SC1");
        assert_eq!(field(&table, first, "Guidance_At_origin"), "05-Jan-24");
        assert_eq!(field(&table, first, "Remarks_1"), "first");
    }

    #[test]
    fn pads_short_rows_with_empty_values() {
        let table = Table::parse(FEED);
        let second = table.rows().nth(1).unwrap();
        assert_eq!(field(&table, second, "company"), "Globex");
        assert_eq!(field(&table, second, "Guidance_At_origin"), "");
        assert_eq!(field(&table, second, "Remarks_1"), "");
    }

    #[test]
    fn unknown_field_or_position_reads_empty() {
        let table = Table::parse(FEED);
        let first = table.rows().next().unwrap();
        assert_eq!(field(&table, first, "Nonexistent"), "");
        assert_eq!(first.at(99), "");
    }

    #[test]
    fn drops_blank_lines() {
        let raw = "group\n\n   \nscancode,company\r\n\r\nSC1,Acme\n\n";
        let table = Table::parse(raw);
        assert_eq!(table.len(), 1);
        assert_eq!(field(&table, table.rows().next().unwrap(), "company"), "Acme");
    }

    #[test]
    fn too_few_lines_is_empty_not_error() {
        assert!(Table::parse("").is_empty());
        assert!(Table::parse("group\nscancode,company\n").is_empty());
        assert!(Table::parse("group\n\n\nscancode\n   \n").is_empty());
    }

    #[test]
    fn honors_quoted_fields() {
        let raw = "group\nscancode,Remarks\nSC1,\"held, then released\"\n";
        let table = Table::parse(raw);
        assert_eq!(
            field(&table, table.rows().next().unwrap(), "Remarks"),
            "held, then released"
        );
    }

    #[test]
    fn trims_values() {
        let raw = "group\nscancode , company\n SC1 ,  Acme  \n";
        let table = Table::parse(raw);
        let row = table.rows().next().unwrap();
        assert_eq!(field(&table, row, "scancode"), "SC1");
        assert_eq!(field(&table, row, "company"), "Acme");
    }

    #[test]
    fn stray_quote_stays_on_its_line() {
        let raw = "group\nscancode,Remarks\nSC1,\"urgent\nSC2,ok\nSC3,ok\n";
        let table = Table::parse(raw);
        assert_eq!(table.len(), 3);

        let codes: Vec<&str> = table.rows().map(|r| field(&table, r, "scancode")).collect();
        assert_eq!(codes, ["SC1", "SC2", "SC3"]);

        let first = table.rows().next().unwrap();
        assert!(!field(&table, first, "Remarks").contains("SC2"));
        let second = table.rows().nth(1).unwrap();
        assert_eq!(field(&table, second, "Remarks"), "ok");
    }
}
