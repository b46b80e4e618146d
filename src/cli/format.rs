//! Output formatting for CLI display.

use crate::feed::format_date;
use crate::model::{Comment, JourneyMode, JourneyNodeConfig, Shipment, TimelineEntry, total_days};

/// Format a delay the way the tracker board shows it.
pub(super) fn format_delay(days: u64) -> String {
    match days {
        0 => "On Time".to_string(),
        1 => "1 Day".to_string(),
        n => format!("{n} Days"),
    }
}

/// One-line summary of a shipment for listings.
pub(super) fn format_shipment_line(shipment: &Shipment) -> String {
    let country = shipment.country.as_deref().unwrap_or("-");
    format!(
        "{:<16} {:<10} {:<20} {:<12} {:<4} {}",
        shipment.scancode,
        shipment.status.label(),
        shipment.company,
        shipment.service_type,
        country,
        format_delay(shipment.total_delay_days()),
    )
}

/// One line per timeline entry: stage, status, dates, delay, remarks.
pub(super) fn format_entry(entry: &TimelineEntry, comment_count: usize) -> String {
    let actual = entry.actual_date.map_or_else(|| "-".to_string(), format_date);
    let mut line = format!(
        "  {:<14} {:<12} planned {}  actual {:<10}",
        entry.stage.label(),
        entry.status.label(),
        format_date(entry.planned_date),
        actual,
    );
    let delay = entry.delay_days();
    if delay > 0 {
        line.push_str(&format!("  delayed by {}", format_delay(delay)));
    }
    if !entry.remarks.is_empty() {
        line.push_str(&format!("  \"{}\"", entry.remarks));
    }
    if comment_count > 0 {
        let noun = if comment_count == 1 { "comment" } else { "comments" };
        line.push_str(&format!("  [{comment_count} {noun}]"));
    }
    line
}

/// A mode's allocation, one stage per line, with its total.
pub(super) fn format_allocation(
    mode: JourneyMode,
    nodes: &[JourneyNodeConfig],
    active: bool,
) -> String {
    let marker = if active { " (active)" } else { "" };
    let mut out = format!("{mode}{marker}\n");
    for node in nodes {
        out.push_str(&format!("  {:<14} {}\n", node.node.label(), node.days));
    }
    out.push_str(&format!("  {:<14} {}/{}", "total", total_days(nodes), mode.days()));
    out
}

pub(super) fn format_comment(comment: &Comment) -> String {
    format!(
        "{}  {}: {}",
        comment.created_at.strftime("%Y-%m-%d %H:%M"),
        comment.author,
        comment.body
    )
}
