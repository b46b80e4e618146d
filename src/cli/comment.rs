//! Comment commands: add, list.
//!
//! Threads hang off a `(shipment, timeline entry)` pair. They are notes for
//! people and never feed back into status or dates.

use clap::Subcommand;
use jiff::Timestamp;
use uuid::Uuid;

use crate::identity::resolve_user;
use crate::model::{Comment, StageKind, TimelineEntry};

use super::Session;
use super::format::format_comment;
use super::shipments::require_shipment;

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Add a comment to one stage of a shipment.
    Add {
        /// The shipment's scancode.
        scancode: String,

        /// The stage, e.g. `landed` or `"Cleared at DC"`.
        stage: StageKind,

        /// Comment body.
        body: String,

        /// Who is commenting. Falls back to `SHIPTRACK_USER`, then the config.
        #[arg(long = "as")]
        user: Option<String>,
    },

    /// List a shipment's comments, optionally for one stage.
    List {
        /// The shipment's scancode.
        scancode: String,

        /// Only this stage's thread.
        stage: Option<StageKind>,
    },
}

pub(super) fn run(session: &mut Session, command: CommentCommand) -> Result<(), String> {
    match command {
        CommentCommand::Add {
            scancode,
            stage,
            body,
            user,
        } => cmd_add(session, &scancode, stage, &body, user.as_deref()),
        CommentCommand::List { scancode, stage } => cmd_list(session, &scancode, stage),
    }
}

fn cmd_add(
    session: &Session,
    scancode: &str,
    stage: StageKind,
    body: &str,
    user: Option<&str>,
) -> Result<(), String> {
    if body.trim().is_empty() {
        return Err("comment body cannot be empty".to_string());
    }
    let author = resolve_user(user, &session.config)?;
    let shipment = require_shipment(session, scancode)?;
    let entry = shipment
        .entry(stage)
        .ok_or_else(|| format!("shipment {scancode} has no {stage} stage"))?;

    let comment = Comment {
        id: Uuid::new_v4(),
        shipment_id: shipment.id.clone(),
        entry_id: entry.id.clone(),
        author,
        body: body.to_string(),
        created_at: Timestamp::now(),
    };
    session
        .storage
        .add_comment(&comment)
        .map_err(|e| format!("failed to save comment: {e}"))?;

    eprintln!("Commented on {scancode} / {stage}");
    Ok(())
}

fn cmd_list(session: &Session, scancode: &str, stage: Option<StageKind>) -> Result<(), String> {
    let shipment = require_shipment(session, scancode)?;
    let entry_id = stage.map(|s| TimelineEntry::entry_id(&shipment.id, s));
    let comments = session
        .storage
        .list_comments(&shipment.id, entry_id.as_deref())
        .map_err(|e| format!("failed to load comments: {e}"))?;

    if comments.is_empty() {
        println!("No comments");
        return Ok(());
    }

    for entry in &shipment.timeline {
        let thread: Vec<&Comment> = comments.iter().filter(|c| c.entry_id == entry.id).collect();
        if thread.is_empty() {
            continue;
        }
        println!("{}", entry.stage);
        for c in thread {
            println!("  {}", format_comment(c));
        }
    }

    Ok(())
}
