//! Property-based tests for ledger invariants
//!
//! These tests use proptest to verify:
//! - Idempotency: equal transactions are stored once
//! - Status changes touch nothing but the status
//! - Removal drops exactly one entry
//! - Ordering: amount descending, ties by id ascending
//! - Range queries exclude both bounds

use chainblock::{Error, Transaction, TransactionStatus, TransactionStore};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Strategy for generating amounts with two decimal places.
/// The range is kept small so equal amounts show up often.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..2_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn status_strategy() -> impl Strategy<Value = TransactionStatus> {
    prop_oneof![
        Just(TransactionStatus::Successful),
        Just(TransactionStatus::Failed),
        Just(TransactionStatus::Unauthorized),
        Just(TransactionStatus::Aborted),
    ]
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Pesho".to_string()),
        Just("Sasho".to_string()),
        Just("Toshko".to_string()),
        Just("Ivan".to_string()),
    ]
}

fn transaction_strategy(id: u32) -> impl Strategy<Value = Transaction> {
    (
        status_strategy(),
        name_strategy(),
        name_strategy(),
        amount_strategy(),
    )
        .prop_map(move |(status, from, to, amount)| {
            Transaction::new(id, status, from, to, amount)
        })
}

/// Strategy for a ledger of transactions with distinct ids.
fn ledger_strategy(max_len: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::btree_set(0u32..10_000, 0..max_len).prop_flat_map(|ids| {
        ids.into_iter()
            .map(transaction_strategy)
            .collect::<Vec<_>>()
    })
}

fn store_of(transactions: &[Transaction]) -> TransactionStore {
    let mut store = TransactionStore::new();
    for tx in transactions {
        store.add(tx.clone());
    }
    store
}

proptest! {
    #[test]
    fn prop_distinct_transactions_are_all_counted(ledger in ledger_strategy(64)) {
        let store = store_of(&ledger);
        prop_assert_eq!(store.count(), ledger.len());
    }

    #[test]
    fn prop_adding_twice_is_idempotent(ledger in ledger_strategy(64)) {
        let mut store = store_of(&ledger);
        for tx in &ledger {
            store.add(tx.clone());
        }
        prop_assert_eq!(store.count(), ledger.len());
        for tx in &ledger {
            prop_assert!(store.contains(tx));
        }
    }

    #[test]
    fn prop_change_status_only_touches_status(
        ledger in ledger_strategy(32).prop_filter("non-empty", |l| !l.is_empty()),
        pick in any::<prop::sample::Index>(),
        status in status_strategy(),
    ) {
        let mut store = store_of(&ledger);
        let original = pick.get(&ledger);

        store.change_transaction_status(original.id(), status).unwrap();

        let expected = original.with_status(status);
        let changed = store.get_by_id(original.id()).unwrap();
        prop_assert_eq!(changed, &expected);
        prop_assert_eq!(store.count(), ledger.len());
    }

    #[test]
    fn prop_remove_drops_exactly_one(
        ledger in ledger_strategy(32).prop_filter("non-empty", |l| !l.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut store = store_of(&ledger);
        let id = pick.get(&ledger).id();

        store.remove_transaction_by_id(id).unwrap();

        prop_assert!(!store.contains_id(id));
        prop_assert_eq!(store.count(), ledger.len() - 1);
        prop_assert_eq!(store.remove_transaction_by_id(id), Err(Error::TransactionNotFound(id)));
        prop_assert_eq!(store.count(), ledger.len() - 1);
    }

    #[test]
    fn prop_ordering_is_total(ledger in ledger_strategy(64)) {
        let store = store_of(&ledger);
        let ordered = store.get_all_ordered_by_amount_descending_then_by_id();

        prop_assert_eq!(ordered.len(), ledger.len());
        for pair in ordered.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.amount() > b.amount() || (a.amount() == b.amount() && a.id() < b.id())
            );
        }
    }

    #[test]
    fn prop_amount_range_is_open_interval(
        ledger in ledger_strategy(64),
        lo in amount_strategy(),
        hi in amount_strategy(),
    ) {
        let store = store_of(&ledger);
        let found: BTreeMap<u32, Transaction> = store
            .get_all_in_amount_range(lo, hi)
            .into_iter()
            .map(|tx| (tx.id(), tx))
            .collect();
        let expected: BTreeMap<u32, Transaction> = ledger
            .iter()
            .filter(|tx| lo < tx.amount() && tx.amount() < hi)
            .map(|tx| (tx.id(), tx.clone()))
            .collect();

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_status_query_errors_instead_of_empty(
        ledger in ledger_strategy(32),
        status in status_strategy(),
    ) {
        let store = store_of(&ledger);
        let expected = ledger.iter().filter(|tx| tx.status() == status).count();

        match store.get_by_transaction_status(status) {
            Ok(found) => {
                prop_assert!(expected > 0);
                prop_assert_eq!(found.len(), expected);
                for pair in found.windows(2) {
                    prop_assert!(pair[0].amount() >= pair[1].amount());
                }
            }
            Err(err) => {
                prop_assert_eq!(expected, 0);
                prop_assert!(matches!(err, Error::NoTransactionsFound(_)), "unexpected error");
            }
        }
    }
}
