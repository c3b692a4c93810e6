mod csv_utils;
mod dto;
mod error;
mod runner;
mod stores;

pub use dto::{Transaction, TransactionStatus};
pub use error::{Error, Result};
pub use runner::{load, run, run_async, Report};
pub use stores::TransactionStore;
