use super::*;
use crate::ledger::error::Missing;

#[test]
fn test_add_entry_unknown_period_and_player() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1"]);
    assert_eq!(
        store
            .add_entry("nope", "p1", entry("e1", 10, day(2025, 3, 1)))
            .unwrap_err(),
        LedgerError::period_not_found("nope")
    );
    assert_eq!(
        store
            .add_entry(&id, "ghost", entry("e1", 10, day(2025, 3, 1)))
            .unwrap_err(),
        LedgerError::player_not_found(&id, "ghost")
    );
}

#[test]
fn test_add_entry_failure_leaves_state_untouched() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1"]);
    store.add_entry(&id, "p1", entry("e1", 50, day(2025, 3, 1))).unwrap();
    let before = store.export_snapshot();

    assert!(matches!(
        store.add_entry(&id, "p1", entry("e2", 0, day(2025, 3, 2))),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert_eq!(
        store
            .add_entry(&id, "p1", entry("e1", 10, day(2025, 3, 2)))
            .unwrap_err(),
        LedgerError::DuplicateId("e1".to_string())
    );

    assert_eq!(store.export_snapshot(), before);
}

#[test]
fn test_entries_accumulate_in_any_order() {
    let (mut store, id) = store_with_period("Dues", 100, &["p1", "p2"]);
    for (i, amount) in [30, 30, 40].iter().enumerate() {
        store
            .add_entry(&id, "p1", entry(&format!("a{i}"), *amount, day(2025, 3, 1)))
            .unwrap();
    }
    for (i, amount) in [40, 30, 30].iter().enumerate() {
        store
            .add_entry(&id, "p2", entry(&format!("b{i}"), *amount, day(2025, 3, 1)))
            .unwrap();
    }
    let p1 = store.player_payment(&id, "p1").unwrap();
    let p2 = store.player_payment(&id, "p2").unwrap();
    assert_eq!(p1.paid_amount(), p2.paid_amount());
    assert_eq!(p1.status(), PaymentStatus::Paid);
    assert_eq!(p2.status(), PaymentStatus::Paid);
}

#[test]
fn test_overpayment_is_paid() {
    let (mut store, id) = store_with_period("Dues", 100, &["p1"]);
    let pp = store
        .add_entry(&id, "p1", entry("e1", 130, day(2025, 3, 1)))
        .unwrap();
    assert_eq!(pp.status(), PaymentStatus::Paid);
    assert_eq!(pp.paid_amount(), dec(130));
    assert_eq!(store.view(&id).unwrap().player_balance("p1").unwrap(), Decimal::ZERO);
}

#[test]
fn test_fractional_amounts_are_exact() {
    let (mut store, id) = store_with_period("Dues", 1, &["p1"]);
    for i in 0..10 {
        let input = PaymentEntryInput {
            id: format!("e{i}"),
            amount: Decimal::new(1, 1),
            date: day(2025, 3, 1),
            note: None,
        };
        store.add_entry(&id, "p1", input).unwrap();
    }
    let pp = store.player_payment(&id, "p1").unwrap();
    assert_eq!(pp.paid_amount(), dec(1));
    assert_eq!(pp.status(), PaymentStatus::Paid);
}

#[test]
fn test_sorted_entries_via_store() {
    let (mut store, id) = store_with_period("Dues", 100, &["p1"]);
    store.add_entry(&id, "p1", entry("old", 10, day(2025, 1, 5))).unwrap();
    store.add_entry(&id, "p1", entry("new", 10, day(2025, 2, 5))).unwrap();

    let pp = store.player_payment(&id, "p1").unwrap();
    let sorted: Vec<&str> = pp.sorted_entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(sorted, vec!["new", "old"]);
}

#[test]
fn test_entry_note_is_kept() {
    let (mut store, id) = store_with_period("Dues", 100, &["p1"]);
    let input = entry("e1", 10, day(2025, 3, 1)).with_note("cash at practice");
    store.add_entry(&id, "p1", input).unwrap();
    let pp = store.player_payment(&id, "p1").unwrap();
    assert_eq!(pp.entry("e1").unwrap().note.as_deref(), Some("cash at practice"));
}

#[test]
fn test_remove_entry_unknown_targets() {
    let (mut store, id) = store_with_period("Dues", 100, &["p1"]);
    store.add_entry(&id, "p1", entry("e1", 10, day(2025, 3, 1))).unwrap();

    assert!(matches!(
        store.remove_entry("nope", "p1", "e1"),
        Err(LedgerError::NotFound(Missing::Period(_)))
    ));
    assert!(matches!(
        store.remove_entry(&id, "ghost", "e1"),
        Err(LedgerError::NotFound(Missing::Player { .. }))
    ));
    assert!(matches!(
        store.remove_entry(&id, "p1", "e9"),
        Err(LedgerError::NotFound(Missing::Entry { .. }))
    ));
    assert!(store.player_payment(&id, "p1").unwrap().has_history());
}

#[test]
fn test_entry_ids_may_repeat_across_periods() {
    let mut store = PaymentLedgerStore::new();
    let a = store.create_period(create_input("A", 10, &["p1"])).unwrap().id().to_string();
    let b = store.create_period(create_input("B", 10, &["p1"])).unwrap().id().to_string();

    store.add_entry(&a, "p1", entry("e1", 10, day(2025, 3, 1))).unwrap();
    store.add_entry(&b, "p1", entry("e1", 10, day(2025, 3, 1))).unwrap();
    assert!(store.get_period(&a).unwrap().contains_entry_id("e1"));
    assert!(store.get_period(&b).unwrap().contains_entry_id("e1"));
}
