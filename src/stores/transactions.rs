//! In-memory transaction ledger and its query engine.
//!
//! Transactions are keyed by id. Queries filter the whole collection and sort
//! explicitly at call time; map iteration order is never relied upon.
//! Queries that select by a status, sender or receiver treat "no match" as an
//! error, while the purely numeric selections return an empty list.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::error::Result;
use crate::{Error, Transaction, TransactionStatus};

#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: HashMap<u32, Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self {
            transactions: HashMap::new(),
        }
    }

    /// Adds a transaction to the ledger.
    /// Adding a transaction equal to one already stored is a no-op.
    pub fn add(&mut self, transaction: Transaction) {
        if self.contains(&transaction) {
            debug!(id = transaction.id(), "skipping duplicate transaction");
            return;
        }
        let id = transaction.id();
        if let Some(previous) = self.transactions.insert(id, transaction) {
            debug!(id, ?previous, "replaced transaction with the same id");
        } else {
            debug!(id, "added transaction");
        }
    }

    /// Checks for a stored transaction equal in every field.
    pub fn contains(&self, transaction: &Transaction) -> bool {
        self.transactions
            .get(&transaction.id())
            .is_some_and(|stored| stored == transaction)
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.transactions.contains_key(&id)
    }

    pub fn count(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Replaces the status of a stored transaction, keeping every other field.
    pub fn change_transaction_status(&mut self, id: u32, status: TransactionStatus) -> Result<()> {
        let stored = self
            .transactions
            .get_mut(&id)
            .ok_or(Error::TransactionNotFound(id))?;
        debug!(id, from = %stored.status(), to = %status, "changing transaction status");
        *stored = stored.with_status(status);
        Ok(())
    }

    pub fn get_by_id(&self, id: u32) -> Result<&Transaction> {
        self.transactions
            .get(&id)
            .ok_or(Error::TransactionNotFound(id))
    }

    pub fn remove_transaction_by_id(&mut self, id: u32) -> Result<()> {
        self.transactions
            .remove(&id)
            .ok_or(Error::TransactionNotFound(id))?;
        debug!(id, "removed transaction");
        Ok(())
    }

    /// Transactions with the given status, largest amount first.
    pub fn get_by_transaction_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>> {
        let mut found = self.select(|tx| tx.status() == status);
        found.sort_by(by_amount_descending);
        require_matches(found, || format!("with status {status}"))
    }

    /// Senders of the transactions with the given status, ordered by their
    /// transaction amount descending. A sender appears once per transaction.
    pub fn get_all_senders_with_transaction_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<String>> {
        let found = self.get_by_transaction_status(status)?;
        Ok(found.into_iter().map(|tx| tx.from().to_owned()).collect())
    }

    /// Receivers of the transactions with the given status, ordered by their
    /// transaction amount descending. A receiver appears once per transaction.
    pub fn get_all_receivers_with_transaction_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<String>> {
        let found = self.get_by_transaction_status(status)?;
        Ok(found.into_iter().map(|tx| tx.to().to_owned()).collect())
    }

    /// Transactions with `lo < amount < hi`, in id order. May be empty.
    pub fn get_all_in_amount_range(&self, lo: Decimal, hi: Decimal) -> Vec<Transaction> {
        self.select(|tx| in_open_range(tx.amount(), lo, hi))
    }

    pub fn get_by_receiver_and_amount_range(
        &self,
        receiver: &str,
        lo: Decimal,
        hi: Decimal,
    ) -> Result<Vec<Transaction>> {
        let mut found = self.select(|tx| tx.to() == receiver && in_open_range(tx.amount(), lo, hi));
        found.sort_by(by_amount_descending);
        require_matches(found, || {
            format!("for receiver {receiver} with amount in ({lo}, {hi})")
        })
    }

    pub fn get_all_ordered_by_amount_descending_then_by_id(&self) -> Vec<Transaction> {
        let mut all: Vec<Transaction> = self.transactions.values().cloned().collect();
        all.sort_by(by_amount_descending_then_id);
        all
    }

    pub fn get_by_receiver_ordered_by_amount_then_by_id(
        &self,
        receiver: &str,
    ) -> Result<Vec<Transaction>> {
        let mut found = self.select(|tx| tx.to() == receiver);
        found.sort_by(by_amount_descending_then_id);
        require_matches(found, || format!("for receiver {receiver}"))
    }

    pub fn get_by_sender_ordered_by_amount_descending(
        &self,
        sender: &str,
    ) -> Result<Vec<Transaction>> {
        let mut found = self.select(|tx| tx.from() == sender);
        found.sort_by(by_amount_descending);
        require_matches(found, || format!("for sender {sender}"))
    }

    /// Transactions with the given status and `amount < max_amount`, in id
    /// order. May be empty.
    pub fn get_by_transaction_status_and_maximum_amount(
        &self,
        status: TransactionStatus,
        max_amount: Decimal,
    ) -> Vec<Transaction> {
        self.select(|tx| tx.status() == status && tx.amount() < max_amount)
    }

    pub fn get_by_sender_and_minimum_amount_descending(
        &self,
        sender: &str,
        min_amount: Decimal,
    ) -> Result<Vec<Transaction>> {
        let mut found = self.select(|tx| tx.from() == sender && tx.amount() > min_amount);
        found.sort_by(by_amount_descending);
        require_matches(found, || {
            format!("for sender {sender} with amount above {min_amount}")
        })
    }

    /// Clones out the matching transactions in ascending id order, which is
    /// the base order every query starts from before its own sort.
    fn select<P>(&self, predicate: P) -> Vec<Transaction>
    where
        P: Fn(&Transaction) -> bool,
    {
        let mut found: Vec<Transaction> = self
            .transactions
            .values()
            .filter(|tx| predicate(tx))
            .cloned()
            .collect();
        found.sort_by_key(Transaction::id);
        trace!(matches = found.len(), "selected transactions");
        found
    }
}

fn in_open_range(amount: Decimal, lo: Decimal, hi: Decimal) -> bool {
    lo < amount && amount < hi
}

fn by_amount_descending(a: &Transaction, b: &Transaction) -> Ordering {
    b.amount().cmp(&a.amount())
}

fn by_amount_descending_then_id(a: &Transaction, b: &Transaction) -> Ordering {
    by_amount_descending(a, b).then_with(|| a.id().cmp(&b.id()))
}

fn require_matches<T, F>(found: Vec<T>, describe: F) -> Result<Vec<T>>
where
    F: FnOnce() -> String,
{
    if found.is_empty() {
        return Err(Error::NoTransactionsFound(describe()));
    }
    Ok(found)
}
