//! Configuration and constants for the CLI.

/// Marker present on every importtime data line
pub const IMPORT_TIME_MARKER: &str = "import time:";

/// Marker identifying the column-header line emitted before the data
pub const HEADER_MARKER: &str = "self [us]";

/// Field separator in the importtime log
pub const FIELD_SEPARATOR: char = '|';

/// -X importtime indents nested imports by 2 spaces per level
pub const INDENT_WIDTH: usize = 2;

/// Name of the synthetic root event spanning the whole trace
pub const SYNTHETIC_ROOT_NAME: &str = "__main__";

// Constants fixed by the trace-event schema the Perfetto UI consumes.
// Field names and values here are an external contract, not ours to change.
pub const EVENT_CATEGORY: &str = "import";
pub const PHASE_COMPLETE: &str = "X";
pub const TRACE_PID: u64 = 1;
pub const TRACE_TID: u64 = 1;

/// Default loopback address for the one-shot trace server
pub const DEFAULT_SERVE_ADDR: &str = "127.0.0.1:9001";

/// Perfetto web UI origin used to build the viewer URL
pub const PERFETTO_UI_ORIGIN: &str = "https://ui.perfetto.dev";
