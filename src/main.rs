//! Importtime Trace CLI
//!
//! Converts `python3 -X importtime` logs into Perfetto trace-event JSON
//! and serves traces to the Perfetto web UI over a one-shot loopback server.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::net::SocketAddr;
use std::path::PathBuf;

use importtime_trace::commands::{
    execute_convert, execute_serve, validate_args, ConvertArgs, ServeArgs,
};
use importtime_trace::utils::config::DEFAULT_SERVE_ADDR;

/// Importtime Trace - Perfetto traces from python -X importtime
#[derive(Parser, Debug)]
#[command(name = "importtime-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an importtime log to trace-event JSON
    Convert {
        /// Path to the importtime log (stderr of python3 -X importtime)
        input: PathBuf,

        /// Output path for the trace JSON document
        output: PathBuf,
    },

    /// Serve a trace once for the Perfetto web UI
    Serve {
        /// Path to trace JSON (defaults to stdin)
        input: Option<PathBuf>,

        /// Loopback address to serve on
        #[arg(long, default_value = DEFAULT_SERVE_ADDR)]
        address: SocketAddr,

        /// Do not open the system browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Validate a trace JSON file
    Validate {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert { input, output } => {
            let args = ConvertArgs { input, output };

            // Validate args first
            validate_args(&args)?;

            execute_convert(args)?;
        }

        Commands::Serve {
            input,
            address,
            no_browser,
        } => {
            execute_serve(ServeArgs {
                input,
                address,
                open_browser: !no_browser,
            })?;
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a trace JSON file
///
/// **Private** - internal command implementation
fn validate_trace_file(file_path: PathBuf) -> Result<()> {
    use importtime_trace::output::read_trace;

    println!("Validating trace: {}", file_path.display());

    let envelope = read_trace(&file_path)?;

    let span = envelope
        .trace_events
        .iter()
        .map(|e| e.ts + e.dur)
        .max()
        .unwrap_or(0);

    println!("✓ Valid trace JSON");
    println!("  Events: {}", envelope.trace_events.len());
    println!("  Span:   {} us", span);

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Importtime Trace Event Schema");
    println!("Format: Chrome/Perfetto trace events");
    println!();

    if show_details {
        println!("Document Structure:");
        println!("  traceEvents: array       - Ordered complete-interval events");
        println!("    name: string           - Imported module name");
        println!("    cat: string            - Always 'import'");
        println!("    ph: string             - Always 'X' (complete interval)");
        println!("    ts: number             - Start time in microseconds");
        println!("    dur: number            - Duration in microseconds");
        println!("    pid: number            - Always 1 (synthetic process)");
        println!("    tid: number            - Always 1 (synthetic thread)");
        println!("    args.indent: number    - Import nesting depth");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Importtime Trace v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Converts python -X importtime logs into Perfetto trace JSON.");
}
