// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::card::build_order_card;
use crate::tests::helpers::order_record;
use order_bridge_domain::OrderStatus;

#[test]
fn test_summary_contains_all_lines_in_order() {
    let order = order_record("order-1", OrderStatus::New);
    let card = build_order_card(&order);

    assert_eq!(
        card.text,
        "Заказ №101\n\
         Rocket Coffee\n\
         Клиент: Ivan\n\
         ASAP\n\
         \n\
         Статус: Новый\n\
         • Flat white ×2 (oat milk)"
    );
}

#[test]
fn test_summary_omits_missing_customer_name() {
    let mut order = order_record("order-1", OrderStatus::New);
    order.document.customer_name = None;

    let card = build_order_card(&order);

    assert!(!card.text.contains("Клиент"));
}

#[test]
fn test_summary_shows_scheduled_time_when_present() {
    let mut order = order_record("order-1", OrderStatus::New);
    order.document.scheduled_for = Some(String::from("2026-02-10 14:30"));

    let card = build_order_card(&order);

    assert!(card.text.contains("К выдаче: 2026-02-10 14:30"));
    assert!(!card.text.contains("ASAP"));
}

#[test]
fn test_item_line_omits_empty_options_suffix() {
    let mut order = order_record("order-1", OrderStatus::New);
    order.document.items[0].options.clear();

    let card = build_order_card(&order);

    assert!(card.text.ends_with("• Flat white ×2"));
}

#[test]
fn test_item_options_are_comma_joined() {
    let mut order = order_record("order-1", OrderStatus::New);
    order.document.items[0].options =
        vec![String::from("oat milk"), String::from("extra shot")];

    let card = build_order_card(&order);

    assert!(card.text.contains("• Flat white ×2 (oat milk, extra shot)"));
}

#[test]
fn test_new_order_has_three_actions_in_graph_order() {
    let order = order_record("order-1", OrderStatus::New);
    let card = build_order_card(&order);

    let labels: Vec<&str> = card.actions.iter().map(|a| a.label.as_str()).collect();
    let tokens: Vec<&str> = card.actions.iter().map(|a| a.token.as_str()).collect();

    assert_eq!(labels, vec!["Принять", "Готов", "Отменить"]);
    assert_eq!(
        tokens,
        vec![
            "order-1:IN_PROGRESS",
            "order-1:READY",
            "order-1:CANCELLED"
        ]
    );
}

#[test]
fn test_ready_order_actions() {
    let order = order_record("order-1", OrderStatus::Ready);
    let card = build_order_card(&order);

    let labels: Vec<&str> = card.actions.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Выдан", "Отменить"]);
}

#[test]
fn test_terminal_orders_have_no_actions() {
    for status in [OrderStatus::Completed, OrderStatus::Cancelled] {
        let order = order_record("order-1", status);
        let card = build_order_card(&order);
        assert!(card.actions.is_empty(), "{status} should render no actions");
    }
}

#[test]
fn test_rendering_does_not_mutate_the_order() {
    let order = order_record("order-1", OrderStatus::New);
    let before = order.clone();

    build_order_card(&order);

    assert_eq!(order, before);
}
