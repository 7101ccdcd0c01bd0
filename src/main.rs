//! txrisk - line-oriented transaction risk assessor
//!
//! Reads newline-delimited JSON from stdin (or the file named by the first
//! argument). Each line is `{"signal": ..., "transaction": ...}`; each output
//! line on stdout is the matching assessment. Logs go to stderr.
//!
//! Usage:
//!   txrisk < records.ndjson
//!   txrisk records.ndjson

use alloy_primitives::U256;
use eyre::{Result, WrapErr};
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use txrisk::core::{assess, AssessmentInput};
use txrisk::models::{AppError, ServiceConfig, TransactionRecord};
use txrisk::utils::constants::{APP_NAME, APP_VERSION};
use txrisk::utils::TelemetryCollector;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stdout carries data)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = ServiceConfig::from_env();
    let telemetry = TelemetryCollector::with_config(config.telemetry_dir.clone(), 1000);

    info!(version = APP_VERSION, "{} reading records", APP_NAME);

    let source = std::env::args().nth(1);
    let outcome = match source.as_deref() {
        Some(path) if path != "-" => {
            let file = tokio::fs::File::open(path)
                .await
                .wrap_err_with(|| format!("cannot open {}", path))?;
            run(file, &telemetry).await
        }
        _ => run(tokio::io::stdin(), &telemetry).await,
    };

    let stats = telemetry.get_stats();
    info!(
        assessed = stats.total_assessed,
        bad = stats.total_bad,
        recorded = stats.total_recorded,
        "Done"
    );
    if let Err(e) = telemetry.flush() {
        warn!(error = %e, "Failed to flush recorded events");
    }

    outcome
}

/// Process lines until EOF or Ctrl+C
async fn run<R: AsyncRead + Unpin>(reader: R, telemetry: &TelemetryCollector) -> Result<()> {
    let mut lines = BufReader::new(reader).lines();
    let mut stdout = tokio::io::stdout();
    let mut line_no = 0usize;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping");
                break;
            }
        };
        let Some(line) = line else { break };
        line_no += 1;

        if line.trim().is_empty() {
            continue;
        }

        let input: AssessmentInput = match serde_json::from_str(&line) {
            Ok(input) => input,
            Err(e) => {
                let err = AppError::from(e);
                warn!(line = line_no, code = err.code_str(), "Skipping malformed line: {}", err);
                continue;
            }
        };

        let start = Instant::now();
        let assessment = assess(&input);
        let value = match &input.transaction {
            Some(TransactionRecord::Explorer(tx)) => tx.value_wei(),
            _ => U256::ZERO,
        };
        telemetry.record(&assessment, value, start.elapsed().as_micros() as u64);

        let mut out = serde_json::to_vec(&assessment)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
    }

    stdout.flush().await?;
    Ok(())
}
