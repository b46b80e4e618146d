//! CLI interface for shiptrack.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out.
//!
//! - `shiptrack refresh`: fetch the feed and rebuild every shipment.
//! - `shiptrack list|show`: read the last successfully loaded shipments.
//! - `shiptrack journey ...`: inspect or change day allocations.
//! - `shiptrack comment ...`: per-stage discussion threads.

mod comment;
mod format;
mod journey;
mod shipments;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::storage::Storage;
use crate::tracker::Tracker;

use comment::CommentCommand;
use journey::JourneyCommand;
use shipments::StatusArg;

/// shiptrack: follow shipments through their journey.
#[derive(Debug, Parser)]
#[command(name = "shiptrack", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow:
  1. shiptrack refresh --source https://example.com/sheet.csv
     (or set feed-url in ~/.shiptrack/config.toml and run `shiptrack refresh`)
  2. shiptrack list --status delayed
  3. shiptrack show SC123456
  4. shiptrack journey mode 12
  5. shiptrack journey save --days pickup=2 --days injection=2
  6. shiptrack comment add SC123456 landed "Held at the ramp overnight""#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the feed and rebuild every shipment.
    ///
    /// On failure the previously loaded shipments are kept untouched.
    Refresh {
        /// Feed location: an `http(s)://` URL or a local file.
        /// Defaults to `feed-url` from the config.
        #[arg(long)]
        source: Option<String>,
    },

    /// List shipments with their status and overall delay.
    List {
        /// Only show shipments with this status.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show one shipment's timeline.
    Show {
        /// The shipment's scancode.
        scancode: String,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Inspect or change journey modes and day allocations.
    Journey {
        #[command(subcommand)]
        command: JourneyCommand,
    },

    /// Read or add comments on a shipment's stages.
    Comment {
        #[command(subcommand)]
        command: CommentCommand,
    },
}

/// Everything a command needs: settings, storage, and the loaded tracker.
pub struct Session {
    root: PathBuf,
    config: Config,
    storage: Storage,
    tracker: Tracker,
}

impl Session {
    /// Opens the storage root and loads the last known state.
    pub fn open(root: PathBuf) -> Result<Self, String> {
        let config = Config::load(&root).map_err(|e| e.to_string())?;
        let journey = config::load_journey(&root).map_err(|e| e.to_string())?;
        let storage =
            Storage::new(&root).map_err(|e| format!("failed to initialize storage: {e}"))?;
        let snapshot = storage
            .load_snapshot()
            .map_err(|e| format!("failed to load shipments: {e}"))?;
        let tracker = Tracker::new(journey, snapshot.shipments, snapshot.refreshed_at);

        Ok(Self {
            root,
            config,
            storage,
            tracker,
        })
    }

    /// Writes the tracker's shipments back to storage.
    fn persist_shipments(&self) -> Result<(), String> {
        self.storage
            .save_snapshot(self.tracker.shipments(), self.tracker.refreshed_at())
            .map_err(|e| format!("failed to save shipments: {e}"))
    }

    /// Writes the journey store and the recalculated shipments.
    fn persist_journey(&self) -> Result<(), String> {
        config::save_journey(&self.root, self.tracker.journey()).map_err(|e| e.to_string())?;
        self.persist_shipments()
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(session: &mut Session) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Refresh { source } => shipments::cmd_refresh(session, source.as_deref()),
        Command::List { status, json } => shipments::cmd_list(session, status, json),
        Command::Show { scancode, json } => shipments::cmd_show(session, &scancode, json),
        Command::Journey { command } => journey::run(session, command),
        Command::Comment { command } => comment::run(session, command),
    }
}
