// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Messaging profiles derived from user documents.
//!
//! User documents are written by the customer-facing application and are not
//! under this store's control, so the fields we care about are read
//! leniently: `messagingTokens` may be a single string or an array holding
//! anything, and `language` may be blank.

use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;

use crate::error::PersistenceError;

/// A user's derived messaging profile.
///
/// Read-only view over the user document: unique, non-empty, trimmed push
/// tokens in first-seen order, plus an optional language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessagingProfile {
    /// Deduplicated push tokens. Empty means the user has no push channel.
    pub tokens: Vec<String>,
    /// Raw preferred-language tag, trimmed. Normalization to a supported
    /// language happens at render time.
    pub language: Option<String>,
}

/// Normalizes the raw `messagingTokens` field.
///
/// Accepts a single string or an array of arbitrary values; trims each
/// string entry, drops empty and non-string entries, and deduplicates in
/// first-seen order.
fn normalize_messaging_tokens(value: Option<&Value>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    let mut push = |raw: &str| {
        let trimmed: &str = raw.trim();
        if !trimmed.is_empty() && !tokens.iter().any(|t| t == trimmed) {
            tokens.push(trimmed.to_string());
        }
    };

    match value {
        Some(Value::String(raw)) => push(raw),
        Some(Value::Array(entries)) => {
            for entry in entries {
                if let Value::String(raw) = entry {
                    push(raw);
                }
            }
        }
        _ => {}
    }

    tokens
}

/// Normalizes the raw `language` field: trims, drops blanks.
fn normalize_language(value: Option<&Value>) -> Option<String> {
    let raw: &str = value?.as_str()?.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Inserts a raw user document.
pub(crate) fn insert_user_document(
    conn: &Connection,
    user_id: &str,
    document: &Value,
) -> Result<(), PersistenceError> {
    let document: String = serde_json::to_string(document)?;

    conn.execute(
        "INSERT INTO users (user_id, document) VALUES (?1, ?2)",
        params![user_id, document],
    )?;

    Ok(())
}

/// Derives the messaging profile for a user.
pub(crate) fn get_user_messaging_profile(
    conn: &Connection,
    user_id: &str,
) -> Result<Option<UserMessagingProfile>, PersistenceError> {
    let document: Option<String> = conn
        .query_row(
            "SELECT document FROM users WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(document) = document else {
        return Ok(None);
    };

    let document: Value = serde_json::from_str(&document)?;

    Ok(Some(UserMessagingProfile {
        tokens: normalize_messaging_tokens(document.get("messagingTokens")),
        language: normalize_language(document.get("language")),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokens_are_trimmed_deduped_and_filtered() {
        let value = json!(["token-a", "", "  ", 123, null, "token-a"]);
        assert_eq!(
            normalize_messaging_tokens(Some(&value)),
            vec![String::from("token-a")]
        );
    }

    #[test]
    fn test_tokens_keep_first_seen_order() {
        let value = json!([" token-b ", "token-a", "token-b"]);
        assert_eq!(
            normalize_messaging_tokens(Some(&value)),
            vec![String::from("token-b"), String::from("token-a")]
        );
    }

    #[test]
    fn test_single_string_token_is_accepted() {
        let value = json!("single-token");
        assert_eq!(
            normalize_messaging_tokens(Some(&value)),
            vec![String::from("single-token")]
        );
    }

    #[test]
    fn test_non_collection_values_yield_no_tokens() {
        assert!(normalize_messaging_tokens(None).is_empty());
        assert!(normalize_messaging_tokens(Some(&json!(42))).is_empty());
        assert!(normalize_messaging_tokens(Some(&json!({"a": 1}))).is_empty());
    }

    #[test]
    fn test_blank_language_is_dropped() {
        assert_eq!(normalize_language(Some(&json!("  "))), None);
        assert_eq!(normalize_language(Some(&json!(""))), None);
        assert_eq!(normalize_language(None), None);
        assert_eq!(
            normalize_language(Some(&json!(" en "))),
            Some(String::from("en"))
        );
    }
}
