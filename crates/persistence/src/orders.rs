// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order reads and the atomic transition unit.

use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::{PersistenceError, TransitionError};
use order_bridge::{CoreError, TransitionOutcome, apply_status_transition};
use order_bridge_domain::{DomainError, OrderDocument, OrderRecord, OrderStatus};

/// Reads an order by id.
pub(crate) fn get_order(
    conn: &Connection,
    order_id: &str,
) -> Result<Option<OrderRecord>, PersistenceError> {
    let document: Option<String> = conn
        .query_row(
            "SELECT document FROM orders WHERE order_id = ?1",
            params![order_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(document) = document else {
        return Ok(None);
    };

    let document: OrderDocument = serde_json::from_str(&document)?;

    Ok(Some(OrderRecord {
        id: order_id.to_string(),
        document,
    }))
}

/// Inserts a new order record after validating document invariants.
pub(crate) fn insert_order(
    conn: &Connection,
    record: &OrderRecord,
) -> Result<(), PersistenceError> {
    record
        .document
        .validate()
        .map_err(|e| PersistenceError::InvalidDocument(e.to_string()))?;

    let document: String = serde_json::to_string(&record.document)?;

    conn.execute(
        "INSERT INTO orders (order_id, status, document) VALUES (?1, ?2, ?3)",
        params![record.id, record.document.status.as_str(), document],
    )?;

    debug!(order_id = %record.id, status = record.document.status.as_str(), "Inserted order");

    Ok(())
}

/// Applies a status transition inside a single immediate transaction.
///
/// The immediate transaction takes the write lock up front, so two
/// concurrent transitions on the same order serialize here: the loser
/// re-reads the winner's committed state and fails validation with
/// `InvalidTransition` rather than appending a conflicting entry.
pub(crate) fn transition_order(
    conn: &mut Connection,
    order_id: &str,
    requested: OrderStatus,
    actor: &str,
) -> Result<OrderRecord, TransitionError> {
    let tx: Transaction<'_> = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let current: OrderRecord = get_order(&tx, order_id)?
        .ok_or_else(|| TransitionError::OrderNotFound(order_id.to_string()))?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let outcome: TransitionOutcome =
        match apply_status_transition(&current, requested, actor, now) {
            Ok(outcome) => outcome,
            Err(CoreError::DomainViolation(DomainError::InvalidStatusTransition {
                from,
                to,
            })) => {
                return Err(TransitionError::InvalidTransition {
                    current: from,
                    requested: to,
                });
            }
            Err(CoreError::DomainViolation(err)) => {
                return Err(TransitionError::Storage(PersistenceError::InvalidDocument(
                    err.to_string(),
                )));
            }
        };

    let document: String = serde_json::to_string(&outcome.order.document)?;
    tx.execute(
        "UPDATE orders SET status = ?2, document = ?3 WHERE order_id = ?1",
        params![order_id, requested.as_str(), document],
    )?;

    tx.commit()?;

    info!(
        order_id = %order_id,
        from = current.document.status.as_str(),
        to = requested.as_str(),
        actor = %actor,
        "Applied order status transition"
    );

    Ok(outcome.order)
}
