use std::env;
use std::error::Error;
use std::io;
use std::process;

use chainblock::{run, Report, TransactionStatus};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so the CSV report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run_app() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run_app() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let report = match args.len() {
        2 => Report::Ledger,
        3 => Report::Status(args[2].parse::<TransactionStatus>()?),
        _ => return Err("Usage: cargo run -- transactions.csv [STATUS]".into()),
    };
    run(&args[1], report, io::stdout())
}
