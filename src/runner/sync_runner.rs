use std::error::Error;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::Report;
use crate::{
    csv_utils::{read_csv, write_csv},
    Transaction, TransactionStore,
};

/// Builds a ledger from the transactions in the given CSV file.
///
/// Rows equal to one already loaded are skipped by the store.
///
/// # Errors
/// Returns an error if the input file cannot be read or the CSV is malformed.
pub fn load<P>(input_path: P) -> Result<TransactionStore, Box<dyn Error>>
where
    P: AsRef<Path>,
{
    let mut store = TransactionStore::new();
    for transaction in read_csv::<Transaction, _>(input_path)? {
        // CSV parsing errors are critical - propagate them
        store.add(transaction?);
    }
    info!(count = store.count(), "loaded ledger");
    Ok(store)
}

/// Loads the ledger from the given input file and writes the requested report to the provided writer.
///
/// # Arguments
/// * `input_path` - Path to the input CSV file containing transactions
/// * `report` - Which transactions to write and in which order
/// * `writer` - Where to write the report (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
/// * The report matches no transactions where it is required to
/// * Writing to the output fails
pub fn run<P, W>(input_path: P, report: Report, writer: W) -> Result<(), Box<dyn Error>>
where
    P: AsRef<Path>,
    W: Write,
{
    let store = load(input_path)?;
    let rows = report.select(&store)?;
    write_csv(writer, rows.into_iter())?;
    Ok(())
}
