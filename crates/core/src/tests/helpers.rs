// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use order_bridge_domain::{OrderDocument, OrderItem, OrderRecord, OrderStatus};

/// Builds an order record in the given status with an empty timeline.
pub fn order_in_status(status: OrderStatus) -> OrderRecord {
    OrderRecord {
        id: String::from("order-1"),
        document: OrderDocument {
            number: 101,
            user_id: Some(String::from("user-1")),
            branch_id: String::from("branch-1"),
            branch_name: String::from("Rocket Coffee"),
            status,
            scheduled_for: None,
            customer_name: None,
            items: vec![OrderItem {
                name: String::from("Flat white"),
                qty: 1,
                options: Vec::new(),
            }],
            timeline: Vec::new(),
        },
    }
}
