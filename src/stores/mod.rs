//! Storage layer for the ledger. Provides:
//! - Transaction records and the queries over them ([`TransactionStore`])
//!
//! Current implementation is optimized for synchronous, direct memory
//! access by a single owner.

mod transactions;

pub use transactions::TransactionStore;
