// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Store;
use order_bridge_domain::{
    BranchDocument, BranchRecord, OrderDocument, OrderItem, OrderRecord, OrderStatus,
};

/// Creates an empty in-memory store.
pub fn test_store() -> Store {
    Store::new_in_memory().expect("Failed to create in-memory store")
}

/// Builds an order record in the given status.
pub fn order_record(id: &str, status: OrderStatus) -> OrderRecord {
    OrderRecord {
        id: id.to_string(),
        document: OrderDocument {
            number: 101,
            user_id: Some(String::from("user-1")),
            branch_id: String::from("branch-1"),
            branch_name: String::from("Rocket Coffee"),
            status,
            scheduled_for: None,
            customer_name: Some(String::from("Ivan")),
            items: vec![OrderItem {
                name: String::from("Flat white"),
                qty: 1,
                options: Vec::new(),
            }],
            timeline: Vec::new(),
        },
    }
}

/// Builds an unlinked branch record.
pub fn branch_record(id: &str) -> BranchRecord {
    BranchRecord {
        id: id.to_string(),
        document: BranchDocument {
            name: String::from("Rocket Coffee"),
            partner_id: String::from("partner-1"),
            telegram_chat_id: None,
            telegram_user_id: None,
        },
    }
}
