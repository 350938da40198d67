// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::UserMessagingProfile;
use crate::tests::helpers::test_store;
use serde_json::json;

#[test]
fn test_profile_is_none_for_unknown_user() {
    let store = test_store();
    assert_eq!(store.get_user_messaging_profile("missing").unwrap(), None);
}

#[test]
fn test_profile_normalizes_tokens_and_language() {
    let mut store = test_store();
    store
        .insert_user_document(
            "user-1",
            &json!({
                "messagingTokens": [" token-a ", "token-b", "token-a"],
                "language": "ru"
            }),
        )
        .unwrap();

    assert_eq!(
        store.get_user_messaging_profile("user-1").unwrap(),
        Some(UserMessagingProfile {
            tokens: vec![String::from("token-a"), String::from("token-b")],
            language: Some(String::from("ru")),
        })
    );
}

#[test]
fn test_profile_drops_invalid_token_entries() {
    let mut store = test_store();
    store
        .insert_user_document(
            "user-1",
            &json!({
                "messagingTokens": ["token-a", "", null, 123, "  "],
                "language": "en"
            }),
        )
        .unwrap();

    assert_eq!(
        store.get_user_messaging_profile("user-1").unwrap(),
        Some(UserMessagingProfile {
            tokens: vec![String::from("token-a")],
            language: Some(String::from("en")),
        })
    );
}

#[test]
fn test_profile_accepts_single_string_token() {
    let mut store = test_store();
    store
        .insert_user_document("user-1", &json!({ "messagingTokens": "single-token" }))
        .unwrap();

    assert_eq!(
        store.get_user_messaging_profile("user-1").unwrap(),
        Some(UserMessagingProfile {
            tokens: vec![String::from("single-token")],
            language: None,
        })
    );
}

#[test]
fn test_profile_with_blank_language_and_no_tokens() {
    let mut store = test_store();
    store
        .insert_user_document(
            "user-1",
            &json!({ "messagingTokens": [], "language": "  " }),
        )
        .unwrap();

    assert_eq!(
        store.get_user_messaging_profile("user-1").unwrap(),
        Some(UserMessagingProfile {
            tokens: Vec::new(),
            language: None,
        })
    );
}
