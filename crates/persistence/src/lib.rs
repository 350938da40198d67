// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Order Bridge.
//!
//! This crate provides a `SQLite`-backed document store for orders,
//! branches, and users. Each collection is a table holding an id plus a JSON
//! document column; the `orders` table additionally carries a `status`
//! column kept in sync inside the transition transaction.
//!
//! The one write path that matters is [`Store::transition_order`]: the
//! atomic read-validate-write unit. It reads the order row, applies the pure
//! transition engine, and writes the updated document back, all inside a
//! single immediate transaction. Conflicting transitions on the same order
//! serialize on that transaction; a raced loser re-reads the post-transition
//! state and fails validation instead of corrupting the timeline.
//!
//! ## Testing
//!
//! Standard tests run against uniquely named in-memory databases (atomic
//! counter, not timestamps) so they are fast, deterministic, and need no
//! external infrastructure.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use order_bridge_domain::{BranchRecord, OrderRecord, OrderStatus};

mod branches;
mod error;
mod orders;
mod schema;
mod users;

#[cfg(test)]
mod tests;

pub use error::{PersistenceError, TransitionError};
pub use schema::initialize_schema;
pub use users::UserMessagingProfile;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Document store for orders, branches, and users.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Creates a store backed by an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let uri: String = format!("file:orderbridge_mem_{db_id}?mode=memory&cache=shared");

        let conn: Connection = Connection::open_with_flags(
            &uri,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        schema::initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a file-based `SQLite` database.
    ///
    /// WAL mode is enabled for better read concurrency.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)?;

        // journal_mode returns the resulting mode as a row
        conn.query_row("PRAGMA journal_mode = WAL", [], |_row| Ok(()))?;
        schema::initialize_schema(&conn)?;

        info!("Opened file-based order store");

        Ok(Self { conn })
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Reads an order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or document decode fails.
    pub fn get_order(&self, order_id: &str) -> Result<Option<OrderRecord>, PersistenceError> {
        orders::get_order(&self.conn, order_id)
    }

    /// Inserts a new order record.
    ///
    /// Document invariants (item quantities, timeline consistency) are
    /// validated before the write.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the insert fails.
    pub fn insert_order(&mut self, record: &OrderRecord) -> Result<(), PersistenceError> {
        orders::insert_order(&self.conn, record)
    }

    /// Applies a status transition to an order, atomically.
    ///
    /// Read, validation, and write happen inside one immediate transaction:
    /// exactly one timeline entry is appended per successful call, and a
    /// failed call writes nothing. This is the only write path for order
    /// status; nothing else mutates order rows.
    ///
    /// # Arguments
    ///
    /// * `order_id` - The order to transition
    /// * `requested` - The status to transition to
    /// * `actor` - Who initiated the transition (e.g. `telegram:42`)
    ///
    /// # Errors
    ///
    /// * `TransitionError::OrderNotFound` if no such order exists
    /// * `TransitionError::InvalidTransition` if the requested status is not
    ///   reachable from the current status
    /// * `TransitionError::Storage` if the read or write fails
    pub fn transition_order(
        &mut self,
        order_id: &str,
        requested: OrderStatus,
        actor: &str,
    ) -> Result<OrderRecord, TransitionError> {
        orders::transition_order(&mut self.conn, order_id, requested, actor)
    }

    // ========================================================================
    // Branches
    // ========================================================================

    /// Reads a branch by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read or document decode fails.
    pub fn get_branch(&self, branch_id: &str) -> Result<Option<BranchRecord>, PersistenceError> {
        branches::get_branch(&self.conn, branch_id)
    }

    /// Inserts a new branch record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_branch(&mut self, record: &BranchRecord) -> Result<(), PersistenceError> {
        branches::insert_branch(&self.conn, record)
    }

    /// Links a chat to a branch, merge-style: only the two chat fields are
    /// rewritten, and the last link wins.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BranchNotFound` if the branch does not
    /// exist; linking never creates branch skeletons.
    pub fn link_branch_to_chat(
        &mut self,
        branch_id: &str,
        chat_id: i64,
        user_id: i64,
    ) -> Result<BranchRecord, PersistenceError> {
        branches::link_branch_to_chat(&mut self.conn, branch_id, chat_id, user_id)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Inserts a raw user document.
    ///
    /// User documents are written by the customer-facing application; this
    /// store only ever derives messaging profiles from them, so the raw JSON
    /// shape is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_user_document(
        &mut self,
        user_id: &str,
        document: &serde_json::Value,
    ) -> Result<(), PersistenceError> {
        users::insert_user_document(&self.conn, user_id, document)
    }

    /// Derives the messaging profile for a user: unique, non-empty, trimmed
    /// push tokens plus an optional language tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn get_user_messaging_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<UserMessagingProfile>, PersistenceError> {
        users::get_user_messaging_profile(&self.conn, user_id)
    }
}
