// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification dispatch.
//!
//! The two channels fail independently: a chat failure propagates so the
//! acting user sees an alert, while push delivery is best-effort and never
//! escalates past this boundary.

use crate::card::ChatCard;
use crate::push::NotificationPayload;
use crate::transport::{ChatMessageRef, ChatTransport, PushTransport, TransportError};
use tracing::warn;

/// Sends or edits the chat card for an order.
///
/// With a message reference the existing message is edited in place;
/// without one a new message is sent to the chat.
///
/// # Errors
///
/// Transport failures propagate; the caller surfaces an alert to the
/// triggering actor and does not retry.
pub fn dispatch_chat_update(
    transport: &dyn ChatTransport,
    chat_id: i64,
    message: Option<ChatMessageRef>,
    card: &ChatCard,
) -> Result<(), TransportError> {
    match message {
        Some(message) => transport.edit_card(message, card),
        None => transport.send_card(chat_id, card),
    }
}

/// Sends a push notification to all of a user's tokens.
///
/// No-op when `tokens` is empty. Delivery is fire-and-forget: a failed
/// multicast is logged and swallowed, never retried, never surfaced to the
/// caller.
pub fn dispatch_push_notification(
    transport: &dyn PushTransport,
    tokens: &[String],
    payload: &NotificationPayload,
) {
    if tokens.is_empty() {
        return;
    }

    if let Err(err) = transport.send_multicast(tokens, payload) {
        warn!(
            error = %err,
            token_count = tokens.len(),
            order_id = %payload.data.order_id,
            "Failed to send order status notification"
        );
    }
}
