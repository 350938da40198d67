// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Branch reads and the chat link flow.

use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tracing::{debug, info};

use crate::error::PersistenceError;
use order_bridge_domain::{BranchDocument, BranchRecord};

/// Reads a branch by id.
pub(crate) fn get_branch(
    conn: &Connection,
    branch_id: &str,
) -> Result<Option<BranchRecord>, PersistenceError> {
    let document: Option<String> = conn
        .query_row(
            "SELECT document FROM branches WHERE branch_id = ?1",
            params![branch_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(document) = document else {
        return Ok(None);
    };

    let document: BranchDocument = serde_json::from_str(&document)?;

    Ok(Some(BranchRecord {
        id: branch_id.to_string(),
        document,
    }))
}

/// Inserts a new branch record.
pub(crate) fn insert_branch(
    conn: &Connection,
    record: &BranchRecord,
) -> Result<(), PersistenceError> {
    let document: String = serde_json::to_string(&record.document)?;

    conn.execute(
        "INSERT INTO branches (branch_id, document) VALUES (?1, ?2)",
        params![record.id, document],
    )?;

    debug!(branch_id = %record.id, "Inserted branch");

    Ok(())
}

/// Links a chat to a branch.
///
/// Merge semantics: only the two chat fields are rewritten; name and partner
/// stay untouched, and a later link overwrites an earlier one wholesale
/// (last link wins). Linking an unknown branch is refused rather than
/// creating a branch skeleton.
pub(crate) fn link_branch_to_chat(
    conn: &mut Connection,
    branch_id: &str,
    chat_id: i64,
    user_id: i64,
) -> Result<BranchRecord, PersistenceError> {
    let tx: Transaction<'_> = conn.transaction()?;

    let mut record: BranchRecord = get_branch(&tx, branch_id)?
        .ok_or_else(|| PersistenceError::BranchNotFound(branch_id.to_string()))?;

    record.document.telegram_chat_id = Some(chat_id);
    record.document.telegram_user_id = Some(user_id);

    let document: String = serde_json::to_string(&record.document)?;
    tx.execute(
        "UPDATE branches SET document = ?2 WHERE branch_id = ?1",
        params![branch_id, document],
    )?;

    tx.commit()?;

    info!(branch_id = %branch_id, chat_id, "Linked branch to chat");

    Ok(record)
}
