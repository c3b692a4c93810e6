use std::error::Error;
use std::io::Write;
use std::path::Path;

use super::Report;
use crate::{csv_utils::write_csv, Transaction, TransactionStore};

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{debug, info};

const BUFFER_SIZE: usize = 1024;

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Loads the ledger async from the given input file and writes the requested report to the provided writer.
/// Spawns two tasks:
/// * CSV reader - streams transactions from the input file, deserializes them and sends them to the processor via channel.
/// * Processor - receives transactions from the channel and adds them to the store until the channel is closed.
///
/// The processor is the only owner of the store, so every mutation happens in order on one task.
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
pub async fn run<P, W>(input_path: P, report: Report, writer: W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    // Create channel for passing transactions from reader to processor
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_transactions(input_path, tx));
    let processor_handle = tokio::spawn(process_transactions(rx));

    // Wait for reader to finish and propagate any errors
    reader_handle.await??;

    // Get final ledger state
    let store = processor_handle.await?;
    info!(count = store.count(), "loaded ledger");

    let rows = report.select(&store)?;
    write_csv(writer, rows.into_iter())?;
    Ok(())
}

/// Reads and deserializes transactions from a CSV file.
/// Returns them through the provided channel.
async fn read_transactions(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<Transaction>,
) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<Transaction>();
    while let Some(result) = records.next().await {
        // CSV parsing errors are critical - propagate them
        let transaction = result?;
        if tx.send(transaction).await.is_err() {
            debug!("processor dropped, stopping reader");
            break;
        }
    }
    Ok(())
}

/// Adds transactions received through the channel to a fresh store.
/// Returns the final store once the channel is closed by the reader.
async fn process_transactions(mut rx: mpsc::Receiver<Transaction>) -> TransactionStore {
    let mut store = TransactionStore::new();
    while let Some(transaction) = rx.recv().await {
        store.add(transaction);
    }
    store
}
