// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply_status_transition;
use crate::error::CoreError;
use crate::tests::helpers::order_in_status;
use order_bridge_domain::{DomainError, OrderStatus};
use time::macros::datetime;

const ACTOR: &str = "telegram:42";

#[test]
fn test_valid_transition_appends_exactly_one_entry() {
    let order = order_in_status(OrderStatus::New);
    let at = datetime!(2026-02-10 12:00 UTC);

    let outcome =
        apply_status_transition(&order, OrderStatus::Ready, ACTOR, at).expect("transition");

    assert_eq!(outcome.order.document.status, OrderStatus::Ready);
    assert_eq!(outcome.order.document.timeline.len(), 1);
    assert_eq!(outcome.order.document.timeline[0], outcome.entry);
    assert_eq!(outcome.entry.status, OrderStatus::Ready);
    assert_eq!(outcome.entry.actor, ACTOR);
    assert_eq!(outcome.entry.at, at);
}

#[test]
fn test_updated_order_satisfies_timeline_invariant() {
    let order = order_in_status(OrderStatus::New);
    let at = datetime!(2026-02-10 12:00 UTC);

    let outcome =
        apply_status_transition(&order, OrderStatus::InProgress, ACTOR, at).expect("transition");

    assert!(outcome.order.document.timeline_is_consistent());
}

#[test]
fn test_snapshot_is_not_mutated() {
    let order = order_in_status(OrderStatus::New);
    let before = order.clone();
    let at = datetime!(2026-02-10 12:00 UTC);

    apply_status_transition(&order, OrderStatus::Ready, ACTOR, at).expect("transition");

    assert_eq!(order, before);
}

#[test]
fn test_prior_timeline_entries_are_preserved() {
    let at = datetime!(2026-02-10 12:00 UTC);
    let later = datetime!(2026-02-10 12:05 UTC);

    let order = order_in_status(OrderStatus::New);
    let first = apply_status_transition(&order, OrderStatus::InProgress, ACTOR, at)
        .expect("first transition");
    let second = apply_status_transition(&first.order, OrderStatus::Ready, ACTOR, later)
        .expect("second transition");

    assert_eq!(second.order.document.timeline.len(), 2);
    assert_eq!(second.order.document.timeline[0], first.entry);
    assert_eq!(second.order.document.timeline[1], second.entry);
}

#[test]
fn test_invalid_transition_is_rejected() {
    let order = order_in_status(OrderStatus::Completed);
    let at = datetime!(2026-02-10 12:00 UTC);

    let result = apply_status_transition(&order, OrderStatus::Ready, ACTOR, at);

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: OrderStatus::Completed,
                to: OrderStatus::Ready,
            }
        ))
    );
}

#[test]
fn test_failed_transition_appends_nothing() {
    let order = order_in_status(OrderStatus::Cancelled);
    let at = datetime!(2026-02-10 12:00 UTC);

    let result = apply_status_transition(&order, OrderStatus::New, ACTOR, at);

    assert!(result.is_err());
    assert!(order.document.timeline.is_empty());
}

#[test]
fn test_every_table_entry_applies_cleanly() {
    let at = datetime!(2026-02-10 12:00 UTC);

    for current in OrderStatus::ALL {
        for next in current.allowed_next_statuses() {
            let order = order_in_status(current);
            let outcome = apply_status_transition(&order, *next, ACTOR, at)
                .unwrap_or_else(|e| panic!("{current} -> {next} should apply: {e}"));
            assert_eq!(outcome.order.document.status, *next);
        }
    }
}

#[test]
fn test_self_transition_is_rejected() {
    let at = datetime!(2026-02-10 12:00 UTC);

    for status in OrderStatus::ALL {
        let order = order_in_status(status);
        assert!(apply_status_transition(&order, status, ACTOR, at).is_err());
    }
}
