//! Output JSON schema definitions for trace-event data.
//!
//! This module defines the structure of JSON files we write to disk.
//! The shape is fixed by the Perfetto / Chrome trace-event format consumed
//! by the downstream viewer; field names here are an external contract.

use serde::{Deserialize, Serialize};

/// Top-level trace document written to JSON
///
/// The viewer expects exactly one key, `traceEvents`, holding the ordered
/// event list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEnvelope {
    /// Ordered sequence of complete-interval events
    #[serde(rename = "traceEvents")]
    pub trace_events: Vec<TraceEvent>,
}

/// A single complete-interval ("X" phase) trace event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Display name (the imported module)
    pub name: String,

    /// Category label, always `"import"`
    pub cat: String,

    /// Phase code, always `"X"` (complete interval)
    pub ph: String,

    /// Start timestamp in microseconds
    pub ts: u64,

    /// Duration in microseconds
    pub dur: u64,

    /// Synthetic process id, always 1
    pub pid: u64,

    /// Synthetic thread id, always 1
    pub tid: u64,

    /// Auxiliary metadata
    pub args: EventArgs,
}

/// Auxiliary per-event metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventArgs {
    /// Nesting depth in the original import tree (0 = top level)
    pub indent: u64,
}
