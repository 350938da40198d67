// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Localized status labels.
//!
//! Exactly two languages are supported. Any unrecognized or absent language
//! tag resolves to the default language.

use crate::status::OrderStatus;

/// Supported message languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Russian, the default language.
    #[default]
    Ru,
    /// English.
    En,
}

impl Language {
    /// Resolves an optional raw language tag (`"en-US"`, `"ru_RU"`, …) to a
    /// supported language.
    ///
    /// The tag's region/script suffix is stripped (first segment on `-` or
    /// `_`) and the remainder lower-cased; anything other than a supported
    /// primary tag falls back to the default.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::default();
        };

        let primary: String = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match primary.as_str() {
            "en" => Self::En,
            _ => Self::default(),
        }
    }
}

/// Returns the human label for a status in the given language.
#[must_use]
pub const fn status_label(status: OrderStatus, language: Language) -> &'static str {
    match language {
        Language::Ru => match status {
            OrderStatus::New => "Новый",
            OrderStatus::InProgress => "Готовится",
            OrderStatus::Ready => "Готов",
            OrderStatus::Completed => "Выдан",
            OrderStatus::Cancelled => "Отменён",
        },
        Language::En => match status {
            OrderStatus::New => "New",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Ready => "Ready",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        },
    }
}

/// Returns the full status → label table for the given language, in
/// canonical status order.
#[must_use]
pub fn status_labels(language: Language) -> [(OrderStatus, &'static str); 5] {
    OrderStatus::ALL.map(|status| (status, status_label(status, language)))
}

/// Returns the action-button phrase for moving an order *to* this status,
/// if one is defined.
///
/// Buttons fall back to the plain status label when no phrase is defined.
/// Button phrases exist only in the default language; partner chats are
/// operated in it.
#[must_use]
pub const fn action_label(status: OrderStatus) -> Option<&'static str> {
    match status {
        OrderStatus::InProgress => Some("Принять"),
        OrderStatus::Ready => Some("Готов"),
        OrderStatus::Completed => Some("Выдан"),
        OrderStatus::Cancelled => Some("Отменить"),
        OrderStatus::New => None,
    }
}
