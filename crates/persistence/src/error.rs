// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use order_bridge_domain::OrderStatus;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Serialization/deserialization of a document failed.
    SerializationError(String),
    /// Schema initialization failed.
    InitializationError(String),
    /// A document violated a domain invariant.
    InvalidDocument(String),
    /// The referenced branch was not found.
    BranchNotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::InvalidDocument(msg) => write!(f, "Invalid document: {msg}"),
            Self::BranchNotFound(branch_id) => write!(f, "Branch {branch_id} was not found"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Errors that can occur while applying an order status transition.
///
/// The first two variants are recoverable and surfaced as user-facing
/// messages; neither is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The referenced order was absent at transition time.
    OrderNotFound(String),
    /// The requested status is not reachable from the current status.
    InvalidTransition {
        /// The status the order holds now.
        current: OrderStatus,
        /// The status the caller asked for.
        requested: OrderStatus,
    },
    /// The underlying read or write failed.
    Storage(PersistenceError),
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderNotFound(order_id) => write!(f, "Order {order_id} was not found"),
            Self::InvalidTransition { current, requested } => {
                write!(
                    f,
                    "Cannot transition order from {} to {}",
                    current.as_str(),
                    requested.as_str()
                )
            }
            Self::Storage(err) => write!(f, "Storage failure: {err}"),
        }
    }
}

impl std::error::Error for TransitionError {}

impl From<PersistenceError> for TransitionError {
    fn from(err: PersistenceError) -> Self {
        Self::Storage(err)
    }
}

impl From<rusqlite::Error> for TransitionError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(PersistenceError::from(err))
    }
}

impl From<serde_json::Error> for TransitionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(PersistenceError::from(err))
    }
}
