//! Mapping from timing records to trace-event JSON structures.
//!
//! A stateless transformation: each reconstructed [`TimingRecord`] becomes
//! one complete-interval event, and the collection is wrapped in the
//! [`TraceEnvelope`] the viewer expects. All constant fields (category,
//! phase, pid/tid) are filled in here.

use crate::parser::schema::{EventArgs, TraceEnvelope, TraceEvent};
use crate::parser::TimingRecord;
use crate::utils::config::{EVENT_CATEGORY, PHASE_COMPLETE, TRACE_PID, TRACE_TID};
use crate::utils::error::ParseError;
use log::debug;

impl From<TimingRecord> for TraceEvent {
    fn from(record: TimingRecord) -> Self {
        TraceEvent {
            name: record.name,
            cat: EVENT_CATEGORY.to_string(),
            ph: PHASE_COMPLETE.to_string(),
            ts: record.start_us,
            dur: record.duration_us,
            pid: TRACE_PID,
            tid: TRACE_TID,
            args: EventArgs {
                indent: record.depth as u64,
            },
        }
    }
}

/// Collect reconstructed records into a trace envelope
///
/// **Public** - main entry point for event emission
///
/// # Arguments
/// * `records` - output of [`crate::parser::reconstruct`]
///
/// # Errors
/// Propagates the first `ParseError` from the reconstruction pass; no
/// partial envelope is produced.
pub fn build_envelope<I>(records: I) -> Result<TraceEnvelope, ParseError>
where
    I: IntoIterator<Item = Result<TimingRecord, ParseError>>,
{
    let trace_events = records
        .into_iter()
        .map(|record| record.map(TraceEvent::from))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Emitted {} trace events", trace_events.len());

    Ok(TraceEnvelope { trace_events })
}
