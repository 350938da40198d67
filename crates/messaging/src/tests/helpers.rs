// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::card::ChatCard;
use crate::push::NotificationPayload;
use crate::transport::{ChatMessageRef, ChatTransport, PushTransport, TransportError};
use order_bridge_domain::{
    BranchDocument, BranchRecord, OrderDocument, OrderItem, OrderRecord, OrderStatus,
};
use order_bridge_persistence::Store;
use std::sync::Mutex;

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
                qty: 2,
                options: vec![String::from("oat milk")],
            }],
            timeline: Vec::new(),
        },
    }
}

/// Builds a branch record, optionally linked to a chat.
pub fn branch_record(id: &str, chat_id: Option<i64>) -> BranchRecord {
    BranchRecord {
        id: id.to_string(),
        document: BranchDocument {
            name: String::from("Rocket Coffee"),
            partner_id: String::from("partner-1"),
            telegram_chat_id: chat_id,
            telegram_user_id: chat_id.map(|_| 42),
        },
    }
}

/// One recorded chat transport invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Text {
        chat_id: i64,
        text: String,
    },
    Card {
        chat_id: i64,
        card: ChatCard,
    },
    Edit {
        message: ChatMessageRef,
        card: ChatCard,
    },
    Answer {
        query_id: String,
        text: String,
        alert: bool,
    },
}

/// A chat transport double that records every invocation.
///
/// Sends and edits can be made to fail independently; acknowledgements
/// always succeed so handlers can report failures back to the user.
#[derive(Default)]
pub struct RecordingChat {
    pub events: Mutex<Vec<ChatEvent>>,
    pub fail_sends: bool,
    pub fail_edits: bool,
}

impl RecordingChat {
    pub fn events(&self) -> Vec<ChatEvent> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: ChatEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ChatTransport for RecordingChat {
    fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        if self.fail_sends {
            return Err(TransportError::Chat(String::from("send failed")));
        }
        self.record(ChatEvent::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    fn send_card(&self, chat_id: i64, card: &ChatCard) -> Result<(), TransportError> {
        if self.fail_sends {
            return Err(TransportError::Chat(String::from("send failed")));
        }
        self.record(ChatEvent::Card {
            chat_id,
            card: card.clone(),
        });
        Ok(())
    }

    fn edit_card(&self, message: ChatMessageRef, card: &ChatCard) -> Result<(), TransportError> {
        if self.fail_edits {
            return Err(TransportError::Chat(String::from("edit failed")));
        }
        self.record(ChatEvent::Edit {
            message,
            card: card.clone(),
        });
        Ok(())
    }

    fn answer(&self, query_id: &str, text: &str, alert: bool) -> Result<(), TransportError> {
        self.record(ChatEvent::Answer {
            query_id: query_id.to_string(),
            text: text.to_string(),
            alert,
        });
        Ok(())
    }
}

/// A push transport double that records multicast calls.
#[derive(Default)]
pub struct RecordingPush {
    pub calls: Mutex<Vec<(Vec<String>, NotificationPayload)>>,
    pub fail: bool,
}

impl RecordingPush {
    pub fn calls(&self) -> Vec<(Vec<String>, NotificationPayload)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PushTransport for RecordingPush {
    fn send_multicast(
        &self,
        tokens: &[String],
        payload: &NotificationPayload,
    ) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::Push(String::from("multicast failed")));
        }
        self.calls
            .lock()
            .unwrap()
            .push((tokens.to_vec(), payload.clone()));
        Ok(())
    }
}
