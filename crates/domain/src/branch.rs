// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Branch documents.
//!
//! A branch is a partner location. Once a partner chat authenticates via the
//! link flow, the chat and user identifiers are stored on the branch; a
//! branch is linked to at most one chat at a time (last link wins).

use serde::{Deserialize, Serialize};

/// The stored shape of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDocument {
    /// Display name of the branch.
    pub name: String,
    /// The partner this branch belongs to.
    pub partner_id: String,
    /// The linked chat, if a chat has authenticated via the link flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_chat_id: Option<i64>,
    /// The chat user who performed the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_user_id: Option<i64>,
}

/// A branch document together with its storage identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    /// Opaque branch id.
    pub id: String,
    /// The stored document.
    #[serde(flatten)]
    pub document: BranchDocument,
}
