//! The runner is responsible for seeding a ledger from a CSV file of
//! transactions and writing a report of it to a writer.
//!
//! This module provides both a synchronous and an asynchronous runner implementations.
//!
mod async_runner;
mod sync_runner;

pub use async_runner::run as run_async;
pub use sync_runner::{load, run};

use crate::{Result, Transaction, TransactionStatus, TransactionStore};

/// Which view of the ledger a runner writes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Every transaction, largest amount first, ties by id.
    Ledger,
    /// Transactions with one status, largest amount first.
    /// Fails when no transaction has that status.
    Status(TransactionStatus),
}

impl Report {
    pub fn select(&self, store: &TransactionStore) -> Result<Vec<Transaction>> {
        match self {
            Report::Ledger => Ok(store.get_all_ordered_by_amount_descending_then_by_id()),
            Report::Status(status) => store.get_by_transaction_status(*status),
        }
    }
}
