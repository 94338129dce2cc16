//! Serve command implementation.
//!
//! The serve command:
//! 1. Reads trace JSON bytes from a file or stdin
//! 2. Serves them once on a loopback address
//! 3. Points the system browser at the Perfetto web UI

use crate::server::OneShotServer;
use crate::utils::config::PERFETTO_UI_ORIGIN;
use anyhow::{Context, Result};
use log::{info, warn};
use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Arguments for the serve command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ServeArgs {
    /// Path to trace JSON; stdin when omitted
    pub input: Option<PathBuf>,

    /// Loopback address to serve on
    pub address: SocketAddr,

    /// Attempt to open the system browser on the viewer URL
    pub open_browser: bool,
}

/// Execute the serve command
///
/// **Public** - main entry point called from main.rs
///
/// Blocks until the viewer has fetched the trace once, then returns.
///
/// # Errors
/// * Input read failures
/// * Address already in use
/// * Transport failures while serving
pub fn execute_serve(args: ServeArgs) -> Result<()> {
    let data = read_trace_bytes(args.input.as_deref())?;
    info!("Loaded {} bytes of trace data", data.len());

    let server =
        OneShotServer::bind(args.address, data).context("Failed to bind trace server")?;
    let addr = server
        .local_addr()
        .context("Failed to resolve bound address")?;

    let url = viewer_url(&addr);
    println!("Serving trace at http://{}/trace.json", addr);
    println!("Viewer: {}", url);

    if args.open_browser {
        if let Err(e) = open_in_browser(&url) {
            warn!("Failed to open browser: {}", e);
        }
    }

    info!("Waiting for the viewer to fetch the trace (Ctrl+C to abort)...");
    server.serve().context("Trace server failed")?;

    info!("✓ Trace served, shutting down");

    Ok(())
}

/// Read the raw trace bytes from a file or stdin
///
/// **Private** - internal helper for execute_serve
fn read_trace_bytes(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read trace from {}", path.display())),
        None => {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .context("Failed to read trace from stdin")?;
            Ok(data)
        }
    }
}

/// Build the Perfetto web UI URL that loads the served trace
///
/// **Private** - internal helper for execute_serve
fn viewer_url(addr: &SocketAddr) -> String {
    format!("{}/#!/?url=http://{}/trace.json", PERFETTO_UI_ORIGIN, addr)
}

/// Hand the URL to the platform's default opener
///
/// **Private** - best effort; callers downgrade failure to a warning
fn open_in_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let opener = "xdg-open";

    std::process::Command::new(opener).arg(url).spawn()?;
    Ok(())
}
