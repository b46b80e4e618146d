//! Journey commands: show, mode, save.

use clap::Subcommand;

use crate::model::{JourneyMode, JourneyNodeConfig, StageKind};

use super::Session;
use super::format::format_allocation;

#[derive(Debug, Subcommand)]
pub enum JourneyCommand {
    /// Show every mode's allocation and which mode is active.
    Show,

    /// Switch the active mode. Recalculates every shipment.
    Mode {
        /// Total journey days: 10, 12 or 15.
        #[arg(value_parser = parse_mode)]
        mode: JourneyMode,
    },

    /// Change the active mode's allocation. Recalculates every shipment.
    ///
    /// Stages not given keep their current days. The new total must equal
    /// the mode's days exactly, or nothing is saved.
    Save {
        /// A stage allocation, e.g. `pickup=2` or `"Cleared at DC=3"`.
        /// Repeat for each stage to change.
        #[arg(long = "days", value_parser = parse_stage_days, required = true)]
        days: Vec<(StageKind, u32)>,
    },
}

pub(super) fn run(session: &mut Session, command: JourneyCommand) -> Result<(), String> {
    match command {
        JourneyCommand::Show => cmd_show(session),
        JourneyCommand::Mode { mode } => cmd_mode(session, mode),
        JourneyCommand::Save { days } => cmd_save(session, &days),
    }
}

fn cmd_show(session: &Session) -> Result<(), String> {
    let (config, active) = session.tracker.journey().get();
    let blocks: Vec<String> = config
        .iter()
        .map(|(mode, nodes)| format_allocation(mode, nodes, mode == active))
        .collect();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

fn cmd_mode(session: &mut Session, mode: JourneyMode) -> Result<(), String> {
    if !session.tracker.set_active_mode(mode) {
        eprintln!("Journey mode is already {mode}");
        return Ok(());
    }
    session.persist_journey()?;
    eprintln!(
        "Journey mode set to {mode}; recalculated {} shipment(s)",
        session.tracker.shipments().len()
    );
    Ok(())
}

fn cmd_save(session: &mut Session, days: &[(StageKind, u32)]) -> Result<(), String> {
    let candidate = apply_overrides(session.tracker.journey().active_allocation(), days);
    let mode = session.tracker.journey().active_mode();

    session
        .tracker
        .save_allocation(candidate)
        .map_err(|e| format!("invalid configuration: {e}"))?;
    session.persist_journey()?;

    eprintln!(
        "Saved {mode} allocation; recalculated {} shipment(s)",
        session.tracker.shipments().len()
    );
    Ok(())
}

/// Applies per-stage overrides to an allocation.
///
/// Later overrides for the same stage win. Stages the allocation didn't
/// mention are added in journey order.
fn apply_overrides(
    current: &[JourneyNodeConfig],
    overrides: &[(StageKind, u32)],
) -> Vec<JourneyNodeConfig> {
    let mut nodes = current.to_vec();
    for &(stage, days) in overrides {
        match nodes.iter_mut().find(|n| n.node == stage) {
            Some(node) => node.days = days,
            None => nodes.push(JourneyNodeConfig { node: stage, days }),
        }
    }
    nodes.sort_by_key(|n| n.node);
    nodes
}

fn parse_mode(s: &str) -> Result<JourneyMode, String> {
    let days: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number of days"))?;
    JourneyMode::try_from(days)
}

fn parse_stage_days(s: &str) -> Result<(StageKind, u32), String> {
    let (stage, days) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected STAGE=DAYS, got '{s}'"))?;
    let stage: StageKind = stage.parse()?;
    let days: u32 = days
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number of days", days.trim()))?;
    Ok((stage, days))
}
