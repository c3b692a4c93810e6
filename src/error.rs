//! Errors raised by the transaction store.
//!
//! Every variant is a "not found" condition caused by caller input:
//! - an id that was never added (or has been removed)
//! - a query that is required to match at least one transaction but matched none
//!
//! Range queries that may legitimately come back empty never produce these.
//! I/O and CSV failures are not store errors and are handled by the runner.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("transaction {0} not found")]
    TransactionNotFound(u32),
    #[error("no transactions found {0}")]
    NoTransactionsFound(String),
}
