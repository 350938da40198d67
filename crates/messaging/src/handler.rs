// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trigger-surface handlers.
//!
//! These functions are the operations the server drives: an order was
//! created, an order's status changed, an operator pressed a card button, a
//! chat asked to be linked to a branch. Each handler classifies failures
//! into the user-facing replies itself; only storage and chat-acknowledgement
//! failures propagate.

use crate::card::build_order_card;
use crate::dispatch::{dispatch_chat_update, dispatch_push_notification};
use crate::push::build_status_notification;
use crate::transport::{ChatMessageRef, ChatTransport, PushTransport, TransportError};
use order_bridge_domain::{
    ActionToken, Language, OrderDocument, OrderRecord, status_label,
};
use order_bridge_persistence::{PersistenceError, Store, TransitionError};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Alert shown for an action token that failed to parse.
const REPLY_MALFORMED_ACTION: &str = "Некорректная команда";
/// Alert shown when the referenced order no longer exists.
const REPLY_ORDER_NOT_FOUND: &str = "Заказ не найден";
/// Alert shown when the requested transition lost to an earlier one.
const REPLY_ALREADY_UPDATED: &str = "Статус уже обновлён";
/// Generic alert for any other failure.
const REPLY_UPDATE_FAILED: &str = "Не удалось обновить заказ";
/// Reply for a `/link` attempt with the wrong secret.
const REPLY_SECRET_MISMATCH: &str = "Секрет не подошёл. Проверьте правильность и попробуйте снова.";
/// Reply for a `/link` attempt against an unknown branch.
const REPLY_BRANCH_NOT_FOUND: &str = "Филиал не найден. Проверьте идентификатор.";

/// Immutable messaging configuration, constructed once at startup and
/// passed to the components that need it.
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// Secret phrase that authorizes `/link` commands.
    pub partner_link_secret: String,
}

impl MessagingConfig {
    /// Creates a new configuration value.
    #[must_use]
    pub const fn new(partner_link_secret: String) -> Self {
        Self {
            partner_link_secret,
        }
    }
}

/// Errors that escape a trigger-surface handler.
///
/// Everything classified into a user-facing reply is handled inside the
/// handler; what remains is storage trouble and failed acknowledgements.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The order store failed.
    #[error("Storage failure: {0}")]
    Storage(#[from] PersistenceError),
    /// A chat send or acknowledgement failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Handles a newly created order: sends its card to the branch's linked
/// chat, if any.
///
/// # Errors
///
/// Returns an error if the branch read fails or the chat send fails.
pub fn on_order_created(
    store: &Store,
    chat: &dyn ChatTransport,
    order: &OrderRecord,
) -> Result<(), MessagingError> {
    let Some(branch) = store.get_branch(&order.document.branch_id)? else {
        warn!(
            branch_id = %order.document.branch_id,
            order_id = %order.id,
            "Order references an unknown branch; skipping chat card"
        );
        return Ok(());
    };

    let Some(chat_id) = branch.document.telegram_chat_id else {
        info!(
            branch_id = %order.document.branch_id,
            order_id = %order.id,
            "No chat linked for branch"
        );
        return Ok(());
    };

    let card = build_order_card(order);
    dispatch_chat_update(chat, chat_id, None, &card)?;

    Ok(())
}

/// Handles an order update: when the status changed, notifies the owning
/// user's devices.
///
/// Push delivery is best-effort; the only errors that escape are store
/// reads.
///
/// # Errors
///
/// Returns an error if the messaging profile read fails.
pub fn on_order_status_changed(
    store: &Store,
    push: &dyn PushTransport,
    before: &OrderDocument,
    after: &OrderRecord,
) -> Result<(), MessagingError> {
    if before.status == after.document.status {
        return Ok(());
    }

    let Some(user_id) = after.document.user_id.as_deref() else {
        info!(order_id = %after.id, "Order has no user reference; skipping push notification");
        return Ok(());
    };

    let Some(profile) = store.get_user_messaging_profile(user_id)? else {
        info!(
            order_id = %after.id,
            user_id = %user_id,
            "No messaging profile for user; skipping push notification"
        );
        return Ok(());
    };

    if profile.tokens.is_empty() {
        info!(
            order_id = %after.id,
            user_id = %user_id,
            "No messaging tokens registered for user; skipping push notification"
        );
        return Ok(());
    }

    let Some(payload) = build_status_notification(after, profile.language.as_deref()) else {
        return Ok(());
    };

    dispatch_push_notification(push, &profile.tokens, &payload);

    Ok(())
}

/// Handles a pressed card button.
///
/// The raw token is parsed before anything touches persistence; engine
/// failures classify into the user-facing alerts; on success the card is
/// re-rendered in place and the press acknowledged with the new status
/// label.
///
/// # Errors
///
/// Returns an error if an acknowledgement itself cannot be delivered.
pub fn on_chat_action(
    store: &mut Store,
    chat: &dyn ChatTransport,
    raw_token: &str,
    actor: &str,
    message: Option<ChatMessageRef>,
    query_id: &str,
) -> Result<(), MessagingError> {
    let token = match ActionToken::parse(raw_token) {
        Ok(token) => token,
        Err(err) => {
            debug!(error = %err, "Rejected malformed action token");
            chat.answer(query_id, REPLY_MALFORMED_ACTION, true)?;
            return Ok(());
        }
    };

    match store.transition_order(&token.order_id, token.status, actor) {
        Ok(updated) => {
            let card = build_order_card(&updated);
            if let Some(message) = message
                && let Err(err) = dispatch_chat_update(chat, message.chat_id, Some(message), &card)
            {
                // The transition is already committed; the stale card is a
                // display problem only.
                error!(
                    error = %err,
                    order_id = %updated.id,
                    "Failed to re-render order card after transition"
                );
                chat.answer(query_id, REPLY_UPDATE_FAILED, true)?;
                return Ok(());
            }

            let ack = format!(
                "Статус: {}",
                status_label(updated.document.status, Language::default())
            );
            chat.answer(query_id, &ack, false)?;
        }
        Err(TransitionError::OrderNotFound(order_id)) => {
            info!(order_id = %order_id, "Chat action referenced a missing order");
            chat.answer(query_id, REPLY_ORDER_NOT_FOUND, true)?;
        }
        Err(TransitionError::InvalidTransition { current, requested }) => {
            info!(
                order_id = %token.order_id,
                current = current.as_str(),
                requested = requested.as_str(),
                "Chat action lost to an earlier transition"
            );
            chat.answer(query_id, REPLY_ALREADY_UPDATED, true)?;
        }
        Err(TransitionError::Storage(err)) => {
            error!(error = %err, order_id = %token.order_id, "Order transition failed");
            chat.answer(query_id, REPLY_UPDATE_FAILED, true)?;
        }
    }

    Ok(())
}

/// Handles a `/link` command: verifies the shared secret and links the chat
/// to the branch.
///
/// # Errors
///
/// Returns an error if the store fails or a reply cannot be delivered.
pub fn on_link_command(
    store: &mut Store,
    chat: &dyn ChatTransport,
    config: &MessagingConfig,
    branch_id: &str,
    provided_secret: &str,
    chat_id: i64,
    user_id: i64,
) -> Result<(), MessagingError> {
    if provided_secret != config.partner_link_secret {
        warn!(branch_id = %branch_id, chat_id, "Rejected link attempt with wrong secret");
        chat.send_text(chat_id, REPLY_SECRET_MISMATCH)?;
        return Ok(());
    }

    match store.link_branch_to_chat(branch_id, chat_id, user_id) {
        Ok(linked) => {
            chat.send_text(
                chat_id,
                &format!(
                    "Филиал «{}» теперь привязан к этому чату.",
                    linked.document.name
                ),
            )?;
        }
        Err(PersistenceError::BranchNotFound(_)) => {
            info!(branch_id = %branch_id, "Link attempt against unknown branch");
            chat.send_text(chat_id, REPLY_BRANCH_NOT_FOUND)?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
