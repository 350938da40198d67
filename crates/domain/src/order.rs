// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order documents and their timeline.
//!
//! An order document is the stored shape of an order (camelCase field names
//! in JSON). Its timeline is an append-only audit log of status changes:
//! once the timeline is non-empty, its last entry's status always equals the
//! order's current status, and it never shrinks or reorders.

use crate::error::DomainError;
use crate::status::OrderStatus;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single ordered line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Display name of the item.
    pub name: String,
    /// Ordered quantity. Must be at least 1.
    pub qty: u32,
    /// Selected option strings (may be empty).
    #[serde(default)]
    pub options: Vec<String>,
}

impl OrderItem {
    /// Validates the item quantity invariant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidItemQuantity` if the quantity is zero.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.qty == 0 {
            return Err(DomainError::InvalidItemQuantity {
                item: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// One entry in an order's status timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// The status the order moved to.
    pub status: OrderStatus,
    /// When the transition happened.
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    /// Who initiated the transition (e.g. `telegram:42`).
    pub actor: String,
}

/// The stored shape of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    /// Sequential display number.
    pub number: i64,
    /// The owning customer, if any. Absence means the order has no push
    /// channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// The branch this order belongs to.
    pub branch_id: String,
    /// Display name of the branch, denormalized onto the order.
    pub branch_name: String,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Scheduled pickup time as entered by the customer. Absence means
    /// ASAP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
    /// Customer display name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Ordered line items.
    pub items: Vec<OrderItem>,
    /// Append-only audit log of status changes.
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

impl OrderDocument {
    /// Checks the timeline invariant: once the timeline is non-empty, its
    /// last entry's status equals the order's current status.
    #[must_use]
    pub fn timeline_is_consistent(&self) -> bool {
        self.timeline
            .last()
            .is_none_or(|entry| entry.status == self.status)
    }

    /// Validates document invariants (item quantities, timeline
    /// consistency).
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        for item in &self.items {
            item.validate()?;
        }

        if let Some(last) = self.timeline.last()
            && last.status != self.status
        {
            return Err(DomainError::InconsistentTimeline {
                status: self.status,
                last_entry: last.status,
            });
        }

        Ok(())
    }
}

/// An order document together with its storage identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Opaque order id.
    pub id: String,
    /// The stored document.
    #[serde(flatten)]
    pub document: OrderDocument,
}
