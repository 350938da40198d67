// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Push notification templates.
//!
//! Only a subset of statuses notifies the customer: `IN_PROGRESS`, `READY`,
//! and `CANCELLED` carry templates; `NEW` and `COMPLETED` produce nothing.
//! Templates exist for both supported languages and are parameterized by
//! branch name and order number.

use order_bridge_domain::{Language, OrderRecord, OrderStatus, status_label};
use serde::Serialize;

/// Structured data attached to a push notification.
///
/// All values are strings so the bag can ride along any multicast data
/// channel unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// The order the notification is about.
    pub order_id: String,
    /// The order's new status (wire name).
    pub status: String,
    /// Localized label for the new status.
    pub status_label: String,
    /// The branch the order belongs to.
    pub branch_id: String,
}

/// A rendered push notification.
///
/// Ephemeral: created and consumed within a single dispatch, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Structured data bag.
    pub data: NotificationData,
}

/// Renders the status notification for an order, if its status has a
/// template.
///
/// The optional raw language tag resolves per the localization rules; the
/// data bag's status label uses the same language as the template.
#[must_use]
pub fn build_status_notification(
    order: &OrderRecord,
    language: Option<&str>,
) -> Option<NotificationPayload> {
    let language: Language = Language::from_tag(language);
    let status: OrderStatus = order.document.status;

    let (title, body) = render_template(
        status,
        language,
        &order.document.branch_name,
        order.document.number,
    )?;

    Some(NotificationPayload {
        title,
        body,
        data: NotificationData {
            order_id: order.id.clone(),
            status: status.as_str().to_string(),
            status_label: status_label(status, language).to_string(),
            branch_id: order.document.branch_id.clone(),
        },
    })
}

/// The per-status, per-language template table.
///
/// Returns `None` for statuses without a push template.
fn render_template(
    status: OrderStatus,
    language: Language,
    branch: &str,
    number: i64,
) -> Option<(String, String)> {
    let (title, body): (&str, String) = match (language, status) {
        (Language::Ru, OrderStatus::InProgress) => (
            "Ваш заказ готовится",
            format!("Заведение «{branch}» приняло заказ №{number}."),
        ),
        (Language::Ru, OrderStatus::Ready) => (
            "Заказ готов к выдаче",
            format!("Заказ №{number} ждёт вас в «{branch}»."),
        ),
        (Language::Ru, OrderStatus::Cancelled) => (
            "Заказ отменён",
            format!("Заказ №{number} в «{branch}» отменён. Проверьте детали в приложении."),
        ),
        (Language::En, OrderStatus::InProgress) => (
            "Your order is being prepared",
            format!("\"{branch}\" has accepted order #{number}."),
        ),
        (Language::En, OrderStatus::Ready) => (
            "Order is ready for pickup",
            format!("Order #{number} is waiting for you at \"{branch}\"."),
        ),
        (Language::En, OrderStatus::Cancelled) => (
            "Order was cancelled",
            format!("Order #{number} at \"{branch}\" was cancelled. Review details in the app."),
        ),
        (_, OrderStatus::New | OrderStatus::Completed) => return None,
    };

    Some((title.to_string(), body))
}
