use super::*;

#[test]
fn test_create_period_initializes_unpaid_players() {
    let (store, id) = store_with_period("Spring Dues", 150, &["p1", "p2"]);
    let period = store.get_period(&id).unwrap();

    assert_eq!(period.title(), "Spring Dues");
    assert_eq!(period.amount(), dec(150));
    assert_eq!(period.order(), 0);
    assert_eq!(period.player_payments().len(), 2);
    for pp in period.player_payments() {
        assert_eq!(pp.status(), PaymentStatus::Unpaid);
        assert!(pp.paid_amount().is_zero());
        assert!(pp.entries().is_empty());
    }
}

#[test]
fn test_create_period_appends_to_end() {
    let (store, created) = store_with_three();
    let orders: Vec<u32> = created
        .iter()
        .map(|id| store.get_period(id).unwrap().order())
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(titles(&store), vec!["A", "B", "C"]);
}

#[test]
fn test_create_period_trims_title_and_dedups_players() {
    let (store, id) = store_with_period("  Field rental  ", 40, &["p1", "p1", "p2"]);
    let period = store.get_period(&id).unwrap();
    assert_eq!(period.title(), "Field rental");
    let players: Vec<&str> = period.participant_ids().collect();
    assert_eq!(players, vec!["p1", "p2"]);
}

#[test]
fn test_create_period_validation() {
    let mut store = PaymentLedgerStore::new();

    let cases = vec![
        create_input("", 150, &["p1"]),
        create_input("   ", 150, &["p1"]),
        create_input("Dues", 0, &["p1"]),
        create_input("Dues", -10, &["p1"]),
        create_input("Dues", 150, &[]),
        create_input("Dues", 150, &["p1", ""]),
        create_input(&"x".repeat(MAX_TITLE_LEN + 1), 150, &["p1"]),
        create_input("Dues", 2_000_000, &["p1"]),
    ];
    for input in cases {
        let err = store.create_period(input).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "got {err:?}");
    }

    let mut negative_total = create_input("Dues", 150, &["p1"]);
    negative_total.team_total_owed = Some(dec(-1));
    assert!(matches!(
        store.create_period(negative_total),
        Err(LedgerError::Validation(_))
    ));

    assert!(store.is_empty());
}

#[test]
fn test_create_period_with_team_total() {
    let mut store = PaymentLedgerStore::new();
    let mut input = create_input("Tournament", 50, &["p1"]);
    input.payment_type = PaymentType::ReserveFee;
    input.team_total_owed = Some(dec(500));

    let period = store.create_period(input).unwrap();
    assert_eq!(period.team_total_owed(), Some(dec(500)));
    assert_eq!(period.payment_type(), PaymentType::ReserveFee);
    assert!(!period.is_balance_type());
}

#[test]
fn test_update_amount_rejects_non_positive() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1"]);
    for amount in [0, -1] {
        assert!(matches!(
            store.update_amount(&id, dec(amount)),
            Err(LedgerError::Validation(_))
        ));
    }
    assert_eq!(store.get_period(&id).unwrap().amount(), dec(150));
}

#[test]
fn test_update_amount_unknown_period() {
    let mut store = PaymentLedgerStore::new();
    assert_eq!(
        store.update_amount("nope", dec(10)).unwrap_err(),
        LedgerError::period_not_found("nope")
    );
}

#[test]
fn test_update_amount_lowering_promotes_status() {
    let (mut store, id) = store_with_period("Dues", 200, &["p1"]);
    store.add_entry(&id, "p1", entry("e1", 150, day(2025, 3, 1))).unwrap();
    assert_eq!(
        store.player_payment(&id, "p1").unwrap().status(),
        PaymentStatus::Partial
    );

    store.update_amount(&id, dec(150)).unwrap();
    assert_eq!(
        store.player_payment(&id, "p1").unwrap().status(),
        PaymentStatus::Paid
    );
}

#[test]
fn test_set_team_total_owed_set_and_clear() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1"]);

    store.set_team_total_owed(&id, Some(dec(300))).unwrap();
    assert_eq!(store.get_period(&id).unwrap().team_total_owed(), Some(dec(300)));

    // zero is a legitimate total
    store.set_team_total_owed(&id, Some(Decimal::ZERO)).unwrap();
    assert_eq!(
        store.get_period(&id).unwrap().team_total_owed(),
        Some(Decimal::ZERO)
    );

    store.set_team_total_owed(&id, None).unwrap();
    assert_eq!(store.get_period(&id).unwrap().team_total_owed(), None);

    assert!(matches!(
        store.set_team_total_owed(&id, Some(dec(-5))),
        Err(LedgerError::Validation(_))
    ));
    // independent of the per-player amount
    assert_eq!(store.get_period(&id).unwrap().amount(), dec(150));
}

#[test]
fn test_rename_and_retype() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1"]);

    store.rename_period(&id, " Fall Dues ").unwrap();
    assert_eq!(store.get_period(&id).unwrap().title(), "Fall Dues");
    assert!(matches!(
        store.rename_period(&id, ""),
        Err(LedgerError::Validation(_))
    ));

    store.set_payment_type(&id, PaymentType::Misc).unwrap();
    assert_eq!(store.get_period(&id).unwrap().payment_type(), PaymentType::Misc);
    assert!(matches!(
        store.set_payment_type("nope", PaymentType::Dues),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn test_add_participant_is_idempotent() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1"]);
    store.add_entry(&id, "p1", entry("e1", 50, day(2025, 3, 1))).unwrap();

    assert!(!store.add_participant(&id, "p1").unwrap());
    let before = store.get_period(&id).unwrap().clone();

    assert!(store.add_participant(&id, "p2").unwrap());
    let after_once = store.get_period(&id).unwrap().clone();
    assert!(!store.add_participant(&id, "p2").unwrap());
    let after_twice = store.get_period(&id).unwrap().clone();

    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice.player_payments().len(), 2);
    assert_eq!(
        after_twice.player_payment("p1"),
        before.player_payment("p1")
    );
    let fresh = after_twice.player_payment("p2").unwrap();
    assert_eq!(fresh.status(), PaymentStatus::Unpaid);
    assert!(!fresh.has_history());
}

#[test]
fn test_remove_participant_destroys_history() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1", "p2"]);
    store.add_entry(&id, "p1", entry("e1", 50, day(2025, 3, 1))).unwrap();

    assert!(store.has_history(&id, "p1").unwrap());
    assert!(!store.has_history(&id, "p2").unwrap());

    let removed = store.remove_participant(&id, "p1").unwrap();
    assert_eq!(removed.entries().len(), 1);
    assert!(matches!(
        store.player_payment(&id, "p1"),
        Err(LedgerError::NotFound(_))
    ));
    assert!(!store.get_period(&id).unwrap().contains_entry_id("e1"));

    assert_eq!(
        store.remove_participant(&id, "p1").unwrap_err(),
        LedgerError::player_not_found(&id, "p1")
    );
}

#[test]
fn test_remove_last_participant_keeps_period() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1"]);
    store.remove_participant(&id, "p1").unwrap();
    let period = store.get_period(&id).unwrap();
    assert!(period.player_payments().is_empty());
    assert_eq!(store.view(&id).unwrap().paid_count(), 0);
}

#[test]
fn test_orphaned_players() {
    let (store, id) = store_with_period("Dues", 150, &["p1", "p2", "p3"]);
    let roster: HashSet<String> = ["p1", "p3", "p9"].iter().map(|s| s.to_string()).collect();

    assert_eq!(store.orphaned_players(&id, &roster).unwrap(), vec!["p2"]);
    assert!(store.orphaned_players("nope", &roster).is_err());
}

#[test]
fn test_periods_for_player() {
    let mut store = PaymentLedgerStore::new();
    store.create_period(create_input("A", 10, &["p1", "p2"])).unwrap();
    store.create_period(create_input("B", 10, &["p2"])).unwrap();
    store.create_period(create_input("C", 10, &["p1"])).unwrap();

    let for_p1: Vec<&str> = store
        .periods_for_player("p1")
        .iter()
        .map(|p| p.title())
        .collect();
    assert_eq!(for_p1, vec!["A", "C"]);
    assert!(store.periods_for_player("ghost").is_empty());
}

#[test]
fn test_delete_period_cascades() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1", "p2"]);
    store.add_entry(&id, "p1", entry("e1", 50, day(2025, 3, 1))).unwrap();
    store.add_entry(&id, "p2", entry("e2", 20, day(2025, 3, 2))).unwrap();

    let removed = store.delete_period(&id).unwrap();
    assert_eq!(removed.player_payments().len(), 2);

    assert!(store.is_empty());
    assert!(store.period(&id).is_none());
    assert!(matches!(
        store.player_payment(&id, "p1"),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(store.view(&id), Err(LedgerError::NotFound(_))));
    assert!(store.periods_for_player("p1").is_empty());

    assert_eq!(
        store.delete_period(&id).unwrap_err(),
        LedgerError::period_not_found(&id)
    );
}

#[test]
fn test_snapshot_roundtrip_preserves_ledger() {
    let (mut store, id) = store_with_period("Dues", 150, &["p1", "p2"]);
    store.add_entry(&id, "p1", entry("e1", 150, day(2025, 3, 1))).unwrap();
    store.set_team_total_owed(&id, Some(dec(300))).unwrap();

    let json = store.export_snapshot().to_json().unwrap();
    let restored =
        PaymentLedgerStore::from_snapshot(LedgerSnapshot::from_json(&json).unwrap()).unwrap();

    assert_eq!(restored.get_period(&id).unwrap(), store.get_period(&id).unwrap());
    assert_eq!(
        restored.view(&id).unwrap().team_remaining(),
        Some(dec(150))
    );
}

#[test]
fn test_from_snapshot_rejects_key_mismatch() {
    let (store, id) = store_with_period("Dues", 150, &["p1"]);
    let mut snapshot = store.export_snapshot();
    let period = snapshot.periods.remove(&id).unwrap();
    snapshot.periods.insert("other".to_string(), period);

    assert!(matches!(
        PaymentLedgerStore::from_snapshot(snapshot),
        Err(SnapshotError::KeyMismatch { .. })
    ));
}

#[test]
fn test_from_snapshot_renumbers_order() {
    let json = r#"{
        "version": 1,
        "periods": {
            "a": {"id": "a", "title": "A", "amount": 10, "order": 7, "created_at": 1},
            "b": {"id": "b", "title": "B", "amount": 10, "order": 3, "created_at": 2},
            "c": {"id": "c", "title": "C", "amount": 10, "order": 3, "created_at": 1}
        }
    }"#;
    let store =
        PaymentLedgerStore::from_snapshot(LedgerSnapshot::from_json(json).unwrap()).unwrap();
    assert_eq!(titles(&store), vec!["C", "B", "A"]);
    let orders: Vec<u32> = store.periods().iter().map(|p| p.order()).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn test_from_snapshot_rejects_invalid_entries() {
    let json = r#"{
        "periods": {
            "a": {"id": "a", "title": "A", "amount": 10, "created_at": 1,
                  "player_payments": [{"player_id": "p1",
                      "entries": [{"id": "e1", "amount": -3, "date": "2025-01-01", "created_at": 1}]}]}
        }
    }"#;
    let err =
        PaymentLedgerStore::from_snapshot(LedgerSnapshot::from_json(json).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::Invalid(LedgerError::InvalidAmount(_))
    ));
}
