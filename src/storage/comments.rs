//! Comment storage: threads scoped to a shipment's timeline entry.

use uuid::Uuid;

use crate::model::Comment;

use super::{Result, Storage, StorageError, parse_timestamp};

impl Storage {
    /// Appends a comment to its thread.
    pub fn add_comment(&self, comment: &Comment) -> Result<()> {
        self.conn.execute(
            "INSERT INTO comment (id, shipment_id, entry_id, author, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                comment.id.to_string(),
                &comment.shipment_id,
                &comment.entry_id,
                &comment.author,
                &comment.body,
                comment.created_at.to_string(),
            ],
        )?;
        Ok(())
    }

    /// Lists a shipment's comments, oldest first.
    ///
    /// With an entry id, only that entry's thread is returned.
    pub fn list_comments(&self, shipment_id: &str, entry_id: Option<&str>) -> Result<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, shipment_id, entry_id, author, body, created_at FROM comment
             WHERE shipment_id = ?1 AND (?2 IS NULL OR entry_id = ?2)
             ORDER BY rowid",
        )?;
        let rows = stmt.query_map(rusqlite::params![shipment_id, entry_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut comments = Vec::new();
        for row in rows {
            let (id, shipment_id, entry_id, author, body, created_at) = row?;
            let id = id
                .parse::<Uuid>()
                .map_err(|e| StorageError::Corrupt(format!("invalid comment id: {e}")))?;
            comments.push(Comment {
                id,
                shipment_id,
                entry_id,
                author,
                body,
                created_at: parse_timestamp("created_at", &created_at)?,
            });
        }
        Ok(comments)
    }
}
