// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Message rendering and notification fan-out for Order Bridge.
//!
//! This crate sits between the transition engine and the delivery channels.
//! It renders an order into channel-specific payloads (a chat card with
//! action buttons, a push notification), dispatches them through the
//! transport seams, and implements the trigger-surface handlers the server
//! drives.
//!
//! Transport implementations are deliberately out of scope: `ChatTransport`
//! and `PushTransport` are the seams a deployment fills in.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod card;
mod dispatch;
mod handler;
mod push;
mod transport;

#[cfg(test)]
mod tests;

pub use card::{CardAction, ChatCard, build_order_card};
pub use dispatch::{dispatch_chat_update, dispatch_push_notification};
pub use handler::{
    MessagingConfig, MessagingError, on_chat_action, on_link_command, on_order_created,
    on_order_status_changed,
};
pub use push::{NotificationData, NotificationPayload, build_status_notification};
pub use transport::{ChatMessageRef, ChatTransport, PushTransport, TransportError};
