use super::*;
use chrono::NaiveDate;
use shared::models::PaymentStatus;

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

fn create_input(title: &str, amount: i64, players: &[&str]) -> PaymentPeriodCreate {
    PaymentPeriodCreate {
        title: title.to_string(),
        amount: dec(amount),
        payment_type: PaymentType::Dues,
        player_ids: ids(players),
        team_total_owed: None,
    }
}

/// Store with one dues period; returns (store, period_id)
fn store_with_period(title: &str, amount: i64, players: &[&str]) -> (PaymentLedgerStore, String) {
    let mut store = PaymentLedgerStore::new();
    let id = store
        .create_period(create_input(title, amount, players))
        .unwrap()
        .id()
        .to_string();
    (store, id)
}

/// Store with periods "A", "B", "C" in that order
fn store_with_three() -> (PaymentLedgerStore, Vec<String>) {
    let mut store = PaymentLedgerStore::new();
    let mut created = Vec::new();
    for title in ["A", "B", "C"] {
        let id = store
            .create_period(create_input(title, 10, &["p1"]))
            .unwrap()
            .id()
            .to_string();
        created.push(id);
    }
    (store, created)
}

fn titles(store: &PaymentLedgerStore) -> Vec<String> {
    store.periods().iter().map(|p| p.title().to_string()).collect()
}

fn entry(id: &str, amount: i64, date: NaiveDate) -> PaymentEntryInput {
    PaymentEntryInput {
        id: id.to_string(),
        amount: dec(amount),
        date,
        note: None,
    }
}

mod test_periods;
mod test_entries;
