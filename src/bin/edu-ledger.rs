use std::fs::File;

use anyhow::{Context, Result};
use edu_ledger::bin_utils::{DEFAULT_CURRENCY, Service};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let currency = std::env::args()
        .nth(2)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        currency,
        error_printer: Box::new(|line, err| warn!(line, "Rejected row: {err}")),
    };
    service.run()
}
