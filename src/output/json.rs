//! JSON trace output writer.
//!
//! Writes TraceEnvelope structs to JSON files with proper formatting.

use crate::parser::schema::TraceEnvelope;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a trace envelope to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `envelope` - Trace data to write
/// * `output_path` - Path to output JSON file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_trace(
    envelope: &TraceEnvelope,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing trace to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    // Pretty printing uses serde_json's default 2-space indent, which is
    // what the viewer-facing contract asks for
    serde_json::to_writer_pretty(writer, envelope).map_err(OutputError::SerializationFailed)?;

    info!(
        "Trace written successfully ({} events, {} bytes)",
        envelope.trace_events.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a trace envelope from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<TraceEnvelope, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let envelope: TraceEnvelope =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!("Trace loaded: {} events", envelope.trace_events.len());

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{EventArgs, TraceEvent};
    use tempfile::NamedTempFile;

    fn create_test_envelope() -> TraceEnvelope {
        TraceEnvelope {
            trace_events: vec![TraceEvent {
                name: "zipimport".to_string(),
                cat: "import".to_string(),
                ph: "X".to_string(),
                ts: 123,
                dur: 90,
                pid: 1,
                tid: 1,
                args: EventArgs { indent: 0 },
            }],
        }
    }

    #[test]
    fn test_write_and_read_trace() {
        let envelope = create_test_envelope();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_trace(&envelope, path).unwrap();
        let loaded = read_trace(path).unwrap();

        assert_eq!(loaded.trace_events.len(), 1);
        assert_eq!(loaded.trace_events[0].name, "zipimport");
        assert_eq!(loaded.trace_events[0].ts, 123);
    }

    #[test]
    fn test_written_json_is_indented() {
        let envelope = create_test_envelope();
        let temp_file = NamedTempFile::new().unwrap();

        write_trace(&envelope, temp_file.path()).unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();

        assert!(content.starts_with("{\n  \"traceEvents\""));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/trace.json");

        let envelope = create_test_envelope();
        write_trace(&envelope, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
