// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The pure half of the order transition engine.
//!
//! `apply_status_transition` takes an immutable order snapshot and produces
//! the updated order plus the timeline entry that records the change. It
//! never performs I/O; the persistence layer runs it inside the atomic
//! read-validate-write unit so that conflicting transitions serialize.

use crate::error::CoreError;
use order_bridge_domain::{OrderRecord, OrderStatus, TimelineEntry};
use time::OffsetDateTime;

/// The result of a successful status transition.
///
/// Every successful transition appends exactly one timeline entry; the
/// updated order's status always equals that entry's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The updated order, with the new status and the appended entry.
    pub order: OrderRecord,
    /// The entry that was appended to the timeline.
    pub entry: TimelineEntry,
}

/// Applies a status transition to an order snapshot.
///
/// The snapshot is not mutated. On success the returned order carries the
/// requested status and a timeline extended by exactly one entry
/// `{status, at, actor}`.
///
/// # Arguments
///
/// * `order` - The current order snapshot (immutable)
/// * `requested` - The status to transition to
/// * `actor` - Who initiated the transition (e.g. `telegram:42`)
/// * `at` - The transition timestamp
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the requested status is not
/// reachable from the order's current status.
pub fn apply_status_transition(
    order: &OrderRecord,
    requested: OrderStatus,
    actor: &str,
    at: OffsetDateTime,
) -> Result<TransitionOutcome, CoreError> {
    order.document.status.validate_transition(requested)?;

    let entry: TimelineEntry = TimelineEntry {
        status: requested,
        at,
        actor: actor.to_string(),
    };

    let mut updated: OrderRecord = order.clone();
    updated.document.status = requested;
    updated.document.timeline.push(entry.clone());

    Ok(TransitionOutcome {
        order: updated,
        entry,
    })
}
