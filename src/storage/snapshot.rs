//! Snapshot storage: the last-known-good shipment list.
//!
//! A refresh that fails never reaches this table, so the previous
//! snapshot survives into the next invocation.

use jiff::Timestamp;
use rusqlite::OptionalExtension;

use crate::model::Shipment;

use super::{Result, Storage, parse_timestamp};

/// The stored shipment list and when it was fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub shipments: Vec<Shipment>,
    pub refreshed_at: Option<Timestamp>,
}

impl Storage {
    /// Replaces the stored snapshot.
    pub fn save_snapshot(
        &self,
        shipments: &[Shipment],
        refreshed_at: Option<Timestamp>,
    ) -> Result<()> {
        let body = serde_json::to_string(shipments)?;
        self.conn.execute(
            "INSERT INTO snapshot (id, refreshed_at, body) VALUES (1, ?1, ?2)
             ON CONFLICT (id) DO UPDATE
             SET refreshed_at = excluded.refreshed_at, body = excluded.body",
            rusqlite::params![refreshed_at.map(|t| t.to_string()), body],
        )?;
        Ok(())
    }

    /// Loads the stored snapshot. Empty if nothing has been stored yet.
    pub fn load_snapshot(&self) -> Result<Snapshot> {
        let row = self
            .conn
            .query_row(
                "SELECT refreshed_at, body FROM snapshot WHERE id = 1",
                [],
                |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        let Some((refreshed_at, body)) = row else {
            return Ok(Snapshot::default());
        };

        let refreshed_at = refreshed_at
            .map(|t| parse_timestamp("refreshed_at", &t))
            .transpose()?;
        let shipments = serde_json::from_str(&body)?;

        Ok(Snapshot {
            shipments,
            refreshed_at,
        })
    }
}
