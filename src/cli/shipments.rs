//! Shipment commands: refresh, list, show.

use clap::ValueEnum;
use jiff::Timestamp;
use serde::Serialize;

use crate::feed::source_for;
use crate::model::{Shipment, ShipmentStatus, StageKind, StageStatus};

use super::Session;
use super::format::{format_delay, format_entry, format_shipment_line};

/// CLI-facing shipment status, mapped to the domain `ShipmentStatus`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    OnTime,
    Delayed,
    Delivered,
    Exception,
}

impl StatusArg {
    fn to_domain(self) -> ShipmentStatus {
        match self {
            Self::OnTime => ShipmentStatus::OnTime,
            Self::Delayed => ShipmentStatus::Delayed,
            Self::Delivered => ShipmentStatus::Delivered,
            Self::Exception => ShipmentStatus::Exception,
        }
    }
}

/// What a consumer sees of a shipment: derived delays included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentView<'a> {
    id: &'a str,
    company: &'a str,
    service_type: &'a str,
    country: Option<&'a str>,
    exception: Option<&'a str>,
    status: ShipmentStatus,
    total_delay_days: u64,
    timeline: Vec<EntryView<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryView<'a> {
    id: &'a str,
    stage: StageKind,
    status: StageStatus,
    planned_date: Timestamp,
    actual_date: Option<Timestamp>,
    delay_days: u64,
    remarks: &'a str,
}

impl<'a> ShipmentView<'a> {
    fn new(shipment: &'a Shipment) -> Self {
        Self {
            id: &shipment.id,
            company: &shipment.company,
            service_type: &shipment.service_type,
            country: shipment.country.as_deref(),
            exception: shipment.exception.as_deref(),
            status: shipment.status,
            total_delay_days: shipment.total_delay_days(),
            timeline: shipment
                .timeline
                .iter()
                .map(|e| EntryView {
                    id: &e.id,
                    stage: e.stage,
                    status: e.status,
                    planned_date: e.planned_date,
                    actual_date: e.actual_date,
                    delay_days: e.delay_days(),
                    remarks: &e.remarks,
                })
                .collect(),
        }
    }
}

pub(super) fn cmd_refresh(session: &mut Session, source: Option<&str>) -> Result<(), String> {
    let location = source
        .map(String::from)
        .or_else(|| session.config.feed_url.clone())
        .ok_or("no feed configured: pass --source or set feed-url in ~/.shiptrack/config.toml")?;
    let source = source_for(&location);

    match session.tracker.refresh(&*source) {
        Ok(count) => {
            session.persist_shipments()?;
            eprintln!("Refreshed {count} shipment(s) from {}", source.describe());
            Ok(())
        }
        Err(e) => Err(format!(
            "failed to fetch shipment data: {e}\nKeeping {} previously loaded shipment(s).",
            session.tracker.shipments().len()
        )),
    }
}

pub(super) fn cmd_list(
    session: &Session,
    status: Option<StatusArg>,
    json: bool,
) -> Result<(), String> {
    let wanted = status.map(StatusArg::to_domain);
    let shipments: Vec<&Shipment> = session
        .tracker
        .shipments()
        .iter()
        .filter(|s| wanted.is_none_or(|w| s.status == w))
        .collect();

    if json {
        let views: Vec<ShipmentView<'_>> = shipments.iter().map(|s| ShipmentView::new(s)).collect();
        return print_json(&views);
    }

    if shipments.is_empty() {
        println!("No shipments");
        return Ok(());
    }

    for s in &shipments {
        println!("{}", format_shipment_line(s));
    }
    if let Some(at) = session.tracker.refreshed_at() {
        eprintln!("Last refreshed {}", at.strftime("%Y-%m-%d %H:%M UTC"));
    }

    Ok(())
}

pub(super) fn cmd_show(session: &Session, scancode: &str, json: bool) -> Result<(), String> {
    let shipment = require_shipment(session, scancode)?;

    if json {
        return print_json(&ShipmentView::new(shipment));
    }

    let comments = session
        .storage
        .list_comments(&shipment.id, None)
        .map_err(|e| format!("failed to load comments: {e}"))?;

    println!(
        "{}  [{}]  {} / {}",
        shipment.scancode, shipment.status, shipment.company, shipment.service_type
    );
    if let Some(country) = &shipment.country {
        println!("Country: {country}");
    }
    if let Some(exception) = &shipment.exception {
        println!("Exception: {exception}");
    }
    for entry in &shipment.timeline {
        let count = comments.iter().filter(|c| c.entry_id == entry.id).count();
        println!("{}", format_entry(entry, count));
    }
    println!(
        "Overall delay: {}",
        format_delay(shipment.total_delay_days())
    );

    Ok(())
}

/// Find a loaded shipment by scancode.
pub(super) fn require_shipment<'a>(
    session: &'a Session,
    scancode: &str,
) -> Result<&'a Shipment, String> {
    session
        .tracker
        .shipment(scancode)
        .ok_or_else(|| format!("no shipment with scancode '{scancode}' (try `shiptrack refresh`)"))
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
