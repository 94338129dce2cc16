//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads the importtime log from disk
//! 2. Reconstructs the import timeline
//! 3. Writes the trace-event JSON document

use crate::emitter::build_envelope;
use crate::output::write_trace;
use crate::parser::reconstruct;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the importtime log (stderr of `python3 -X importtime`)
    pub input: PathBuf,

    /// Output path for the trace JSON document
    pub output: PathBuf,
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input read failures
/// * Corrupt timing fields in the log (the whole conversion aborts)
/// * Output write failures
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Converting importtime log: {}", args.input.display());

    // Step 1: Read input
    info!("Step 1/3: Reading importtime log...");
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read importtime log from {}", args.input.display()))?;

    // Step 2: Reconstruct the timeline and emit events
    info!("Step 2/3: Reconstructing import timeline...");
    let envelope =
        build_envelope(reconstruct(raw.lines())).context("Failed to parse importtime data")?;

    debug!("Emitted {} trace events", envelope.trace_events.len());

    // Step 3: Write output
    info!("Step 3/3: Writing trace JSON...");
    write_trace(&envelope, &args.output).context("Failed to write trace JSON")?;

    info!("✓ Trace written to: {}", args.output.display());

    let elapsed = start_time.elapsed();
    info!("Conversion completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Input and output paths must differ");
    }

    Ok(())
}
