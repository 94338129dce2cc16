//! Importtime Trace
//!
//! Converts the output of `python3 -X importtime` into Perfetto
//! trace-event JSON and serves it to the Perfetto web UI.
//!
//! This crate provides the core implementation for the
//! `importtime-trace` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! python3 -X importtime -c 'import json' 2> importtime.log
//! importtime-trace convert importtime.log trace.json
//! importtime-trace serve trace.json
//! ```

pub mod commands;
pub mod emitter;
pub mod output;
pub mod parser;
pub mod server;
pub mod utils;
