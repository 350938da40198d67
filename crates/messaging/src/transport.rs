// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery transport seams.
//!
//! Implementing these traits is a deployment concern: the bot API client
//! and the push multicast client live behind them. Everything in this
//! workspace programs against the traits, and tests substitute recording
//! doubles.

use crate::card::ChatCard;
use crate::push::NotificationPayload;
use thiserror::Error;

/// Identifies an existing chat message for in-place edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatMessageRef {
    /// The chat the message lives in.
    pub chat_id: i64,
    /// The message within the chat.
    pub message_id: i64,
}

/// Errors surfaced by a transport implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Chat delivery failed.
    #[error("Chat delivery failed: {0}")]
    Chat(String),
    /// Push delivery failed.
    #[error("Push delivery failed: {0}")]
    Push(String),
}

/// The chat-bot delivery channel.
pub trait ChatTransport {
    /// Sends a plain text message to a chat.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TransportError>;

    /// Sends a card (text plus action buttons) to a chat.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails.
    fn send_card(&self, chat_id: i64, card: &ChatCard) -> Result<(), TransportError>;

    /// Replaces an existing message with a re-rendered card.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit fails.
    fn edit_card(&self, message: ChatMessageRef, card: &ChatCard) -> Result<(), TransportError>;

    /// Acknowledges a pending chat action, optionally as an alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the acknowledgement fails.
    fn answer(&self, query_id: &str, text: &str, alert: bool) -> Result<(), TransportError>;
}

/// The mobile push delivery channel.
pub trait PushTransport {
    /// Sends one multicast notification across all tokens.
    ///
    /// Partial per-token delivery failure is a transport-internal concern;
    /// an error here means the multicast itself failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the multicast send fails.
    fn send_multicast(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<(), TransportError>;
}
