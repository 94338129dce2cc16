//! Importtime log parsing and trace schema definitions.
//!
//! This module handles:
//! - Reconstructing a timeline from the flat importtime log
//! - Defining the trace-event output schema

pub mod importtime;
pub mod schema;

// Re-export main types
pub use importtime::{reconstruct, TimingRecord, TimingRecords};
pub use schema::{EventArgs, TraceEnvelope, TraceEvent};
