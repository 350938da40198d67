// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order status states and transition logic.
//!
//! This module defines the order lifecycle states and the fixed graph of
//! valid transitions between them. Status transitions are operator-initiated
//! only; the system never advances an order based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Order lifecycle states.
///
/// Serialized wire names are the literal enum names (`NEW`, `IN_PROGRESS`,
/// and so on); the same names appear in stored documents and in action
/// tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order has been placed and not yet accepted by the branch.
    New,
    /// Branch has accepted the order and is preparing it.
    InProgress,
    /// Order is ready for pickup.
    Ready,
    /// Order has been handed to the customer.
    Completed,
    /// Order was cancelled.
    Cancelled,
}

impl OrderStatus {
    /// All statuses in declaration order.
    ///
    /// The order here is the canonical render order for status-derived UI
    /// (card actions, bulk label tables).
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::InProgress,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence, action tokens, and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Ready => "READY",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid
    /// status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "NEW" => Ok(Self::New),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "READY" => Ok(Self::Ready),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// Returns the statuses this status may transition to, in the order
    /// they should be rendered.
    ///
    /// The table is fixed:
    ///
    /// - `NEW` → `IN_PROGRESS`, `READY`, `CANCELLED`
    /// - `IN_PROGRESS` → `READY`, `CANCELLED`
    /// - `READY` → `COMPLETED`, `CANCELLED`
    /// - `COMPLETED`, `CANCELLED` → nothing (terminal)
    #[must_use]
    pub const fn allowed_next_statuses(self) -> &'static [Self] {
        match self {
            Self::New => &[Self::InProgress, Self::Ready, Self::Cancelled],
            Self::InProgress => &[Self::Ready, Self::Cancelled],
            Self::Ready => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Returns true if this status is terminal (no outgoing transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Checks whether a transition from this status to `next` is permitted.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_statuses().contains(&next)
    }

    /// Validates a transition from this status to `next`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not in the fixed table.
    pub fn validate_transition(&self, next: Self) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: next,
            })
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
