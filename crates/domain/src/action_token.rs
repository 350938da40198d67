// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Action tokens carried by chat card buttons.
//!
//! A token encodes the pair `(order id, target status)` as
//! `"<orderId>:<statusName>"`. Parsing is strict: exactly two non-empty
//! fields, and the status field must be one of the five known wire names.
//! Malformed tokens are rejected before anything touches persistence.

use crate::error::DomainError;
use crate::status::OrderStatus;
use std::str::FromStr;

/// A parsed card action token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionToken {
    /// The order to act on.
    pub order_id: String,
    /// The status the action requests.
    pub status: OrderStatus,
}

impl ActionToken {
    /// The field delimiter in the encoded form.
    pub const DELIMITER: char = ':';

    /// Creates a new token.
    #[must_use]
    pub const fn new(order_id: String, status: OrderStatus) -> Self {
        Self { order_id, status }
    }

    /// Encodes the token into its wire form.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}",
            self.order_id,
            Self::DELIMITER,
            self.status.as_str()
        )
    }

    /// Parses a raw token.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedActionToken` when the delimiter is
    /// missing, either field is empty, or the status field is not a known
    /// status name.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let malformed = || DomainError::MalformedActionToken(raw.to_string());

        let (order_id, status) = raw.split_once(Self::DELIMITER).ok_or_else(malformed)?;

        if order_id.is_empty() || status.is_empty() {
            return Err(malformed());
        }

        let status: OrderStatus = status.parse().map_err(|_| malformed())?;

        Ok(Self {
            order_id: order_id.to_string(),
            status,
        })
    }
}

impl FromStr for ActionToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ActionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.order_id,
            Self::DELIMITER,
            self.status.as_str()
        )
    }
}
