// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::OrderStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The string is not one of the known order statuses.
    InvalidStatus(String),
    /// The requested status is not reachable from the current status.
    InvalidStatusTransition {
        /// The order's current status.
        from: OrderStatus,
        /// The requested next status.
        to: OrderStatus,
    },
    /// An action token failed to parse.
    MalformedActionToken(String),
    /// An order item carried a zero quantity.
    InvalidItemQuantity {
        /// The name of the offending item.
        item: String,
    },
    /// An order's timeline disagrees with its current status.
    InconsistentTimeline {
        /// The order's current status.
        status: OrderStatus,
        /// The status of the last timeline entry.
        last_entry: OrderStatus,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(s) => write!(f, "Unknown order status: '{s}'"),
            Self::InvalidStatusTransition { from, to } => {
                write!(
                    f,
                    "Cannot transition order from {} to {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::MalformedActionToken(raw) => {
                write!(f, "Malformed action token: '{raw}'")
            }
            Self::InvalidItemQuantity { item } => {
                write!(f, "Item '{item}' must have a quantity of at least 1")
            }
            Self::InconsistentTimeline { status, last_entry } => {
                write!(
                    f,
                    "Order status {} disagrees with last timeline entry {}",
                    status.as_str(),
                    last_entry.as_str()
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
