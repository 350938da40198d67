// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chat card rendering.
//!
//! A chat card is the partner-facing representation of an order: a
//! multi-line text summary plus one action button per legal next status.
//! Rendering never mutates the order.

use order_bridge_domain::{ActionToken, Language, OrderRecord, action_label, status_label};

/// One action button on a chat card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAction {
    /// Button label shown to the operator.
    pub label: String,
    /// Encoded action token carried back on press.
    pub token: String,
}

/// A rendered chat card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCard {
    /// Multi-line order summary.
    pub text: String,
    /// Action buttons in transition-graph order. Empty for terminal
    /// statuses.
    pub actions: Vec<CardAction>,
}

/// Renders an order into a chat card.
#[must_use]
pub fn build_order_card(order: &OrderRecord) -> ChatCard {
    ChatCard {
        text: build_order_summary(order),
        actions: build_card_actions(order),
    }
}

fn build_order_summary(order: &OrderRecord) -> String {
    let document = &order.document;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("Заказ №{}", document.number));
    lines.push(document.branch_name.clone());

    if let Some(customer_name) = &document.customer_name {
        lines.push(format!("Клиент: {customer_name}"));
    }

    lines.push(
        document
            .scheduled_for
            .as_ref()
            .map_or_else(|| String::from("ASAP"), |at| format!("К выдаче: {at}")),
    );

    lines.push(String::new());
    lines.push(format!(
        "Статус: {}",
        status_label(document.status, Language::default())
    ));

    for item in &document.items {
        let options_suffix: String = if item.options.is_empty() {
            String::new()
        } else {
            format!(" ({})", item.options.join(", "))
        };
        lines.push(format!("• {} ×{}{}", item.name, item.qty, options_suffix));
    }

    lines.join("\n")
}

fn build_card_actions(order: &OrderRecord) -> Vec<CardAction> {
    order
        .document
        .status
        .allowed_next_statuses()
        .iter()
        .map(|status| {
            let label: &str =
                action_label(*status).unwrap_or_else(|| status_label(*status, Language::default()));
            CardAction {
                label: label.to_string(),
                token: ActionToken::new(order.id.clone(), *status).encode(),
            }
        })
        .collect()
}
