//! Timeline reconstruction from `python3 -X importtime` logs.
//!
//! The log lists imports in completion order: a module's line is written only
//! once the import has fully finished, so children appear before their parent
//! and nesting is encoded purely by indentation (2 spaces per level):
//!
//! ```text
//! import time: self [us] | cumulative | imported package
//! import time:       101 |        101 |   _io
//! import time:        22 |         22 |   marshal
//! import time:        90 |        121 | zipimport
//! ```
//!
//! Start times are never recorded. They are reconstructed with one running
//! end-time cursor per depth: siblings at a depth are sequential, so each
//! record starts where the previous one at that depth ended, and a deeper
//! entry starts where its parent's unconsumed time begins.

use crate::utils::config::{
    FIELD_SEPARATOR, HEADER_MARKER, IMPORT_TIME_MARKER, INDENT_WIDTH, SYNTHETIC_ROOT_NAME,
};
use crate::utils::error::ParseError;

/// A single reconstructed import interval
///
/// **Public** - consumed by the emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingRecord {
    /// Reconstructed start time in microseconds
    pub start_us: u64,

    /// Cumulative duration in microseconds (includes nested imports)
    pub duration_us: u64,

    /// Imported module name, indentation stripped
    pub name: String,

    /// Nesting depth in the import tree (0 = top level)
    pub depth: usize,
}

/// Lazy, single-pass iterator of reconstructed timing records
///
/// **Public** - created by [`reconstruct`]
///
/// Yields one `Ok(TimingRecord)` per data line, then a final synthetic
/// record `(0, max_time, "__main__", 0)` spanning the whole trace. Lines
/// that do not match the data-line shape are skipped silently; a data line
/// with an unparseable cumulative field yields `Err` and fuses the iterator.
pub struct TimingRecords<I> {
    lines: I,

    /// One "current end time" cursor per active depth; `stack[d]` is the
    /// next available start time for a record at depth `d`. Never empty.
    stack: Vec<u64>,

    /// Largest end time seen so far, becomes the synthetic root's duration
    max_time_us: u64,

    finished: bool,
}

/// Reconstruct timing records from importtime log lines
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `lines` - the log, line by line, headers and noise included
///
/// # Returns
/// A lazy iterator of `Result<TimingRecord, ParseError>`; see
/// [`TimingRecords`] for the emission contract. Empty input yields just the
/// synthetic root record with zero duration.
pub fn reconstruct<I>(lines: I) -> TimingRecords<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    TimingRecords {
        lines: lines.into_iter(),
        stack: vec![0],
        max_time_us: 0,
        finished: false,
    }
}

impl<I, S> Iterator for TimingRecords<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<TimingRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let Some(line) = self.lines.next() else {
                // Input exhausted: close with the synthetic root record
                self.finished = true;
                return Some(Ok(TimingRecord {
                    start_us: 0,
                    duration_us: self.max_time_us,
                    name: SYNTHETIC_ROOT_NAME.to_string(),
                    depth: 0,
                }));
            };

            let (cumulative, depth, name) = match parse_data_line(line.as_ref()) {
                Ok(Some(fields)) => fields,
                Ok(None) => continue,
                Err(err) => {
                    // A corrupt timing field aborts the whole reconstruction
                    self.finished = true;
                    return Some(Err(err));
                }
            };

            // A deeper entry is a sub-import of the most recent shallower one
            // and starts where that entry's unconsumed time begins, so each
            // pushed level inherits its parent's cursor. Jumps of more than
            // one level duplicate the cursor once per pushed level.
            while self.stack.len() < depth + 1 {
                let top = self.stack[self.stack.len() - 1];
                self.stack.push(top);
            }
            // Dedent closes one level at a time, even across multiple levels
            while self.stack.len() > depth + 1 {
                self.stack.pop();
            }

            let start_us = self.stack[depth];
            self.stack[depth] = start_us + cumulative;
            self.max_time_us = self.max_time_us.max(self.stack[depth]);

            return Some(Ok(TimingRecord {
                start_us,
                duration_us: cumulative,
                name,
                depth,
            }));
        }
    }
}

/// Classify and split a single log line
///
/// **Private** - internal helper for the iterator
///
/// Returns `Ok(None)` for anything that is not a data line (headers,
/// comments, blank lines, wrong field count). Returns `Err` only when a line
/// has the data shape but its cumulative field is not an integer.
fn parse_data_line(line: &str) -> Result<Option<(u64, usize, String)>, ParseError> {
    if !line.contains(IMPORT_TIME_MARKER) || line.contains(HEADER_MARKER) {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if parts.len() != 3 {
        return Ok(None);
    }

    let raw = parts[1].trim();
    let cumulative = raw
        .parse::<u64>()
        .map_err(|source| ParseError::InvalidCumulative {
            value: raw.to_string(),
            source,
        })?;

    // The name field starts with "<space><2 spaces per level>name"; the
    // single leading space comes from the "| " separator formatting.
    let field = parts[2].trim_end();
    let name = field.trim_start();
    let depth = (field.len() - name.len()).saturating_sub(1) / INDENT_WIDTH;

    Ok(Some((cumulative, depth, name.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(start: u64, dur: u64, name: &str, depth: usize) -> TimingRecord {
        TimingRecord {
            start_us: start,
            duration_us: dur,
            name: name.to_string(),
            depth,
        }
    }

    fn records(input: &str) -> Vec<TimingRecord> {
        reconstruct(input.lines())
            .collect::<Result<Vec<_>, _>>()
            .expect("reconstruction should succeed")
    }

    #[test]
    fn test_round_trip_scenario() {
        let input = "\
import time: self [us] | cumulative | imported package
import time:       101 |        101 |   _io
import time:        22 |         22 |   marshal
import time:        90 |        121 | zipimport
";
        assert_eq!(
            records(input),
            vec![
                record(0, 101, "_io", 1),
                record(101, 22, "marshal", 1),
                record(0, 121, "zipimport", 0),
                record(0, 123, "__main__", 0),
            ]
        );
    }

    #[test]
    fn test_empty_input_yields_only_synthetic_root() {
        assert_eq!(records(""), vec![record(0, 0, "__main__", 0)]);
    }

    #[test]
    fn test_non_data_lines_are_skipped() {
        let input = "\
import time: self [us] | cumulative | imported package

# ????
not a data line at all
import time: missing separators
import time:       609 |        609 |   time
";
        assert_eq!(
            records(input),
            vec![record(0, 609, "time", 1), record(0, 609, "__main__", 0)]
        );
    }

    #[test]
    fn test_malformed_cumulative_field_is_an_error() {
        let input = "import time:        90 |     oops |   zipimport\n";
        let results: Vec<_> = reconstruct(input.lines()).collect();

        assert_eq!(results.len(), 1, "iterator must fuse after the error");
        let err = results
            .into_iter()
            .next()
            .expect("one result")
            .expect_err("corrupt cumulative field must fail");
        assert!(err.to_string().contains("oops"), "unexpected error: {err}");
    }

    #[test]
    fn test_zero_leading_spaces_is_depth_zero() {
        // No padding at all in the name field
        let input = "import time: 5 | 5 |zipimport\n";
        assert_eq!(records(input)[0], record(0, 5, "zipimport", 0));
    }

    #[test]
    fn test_deep_jump_duplicates_parent_cursor() {
        // _codecs appears two levels deeper than anything before it
        let input = "\
import time:        27 |         27 |     _codecs
import time:       193 |        220 |   codecs
import time:       451 |        451 |   encodings.aliases
import time:       588 |       1259 | encodings
";
        assert_eq!(
            records(input),
            vec![
                record(0, 27, "_codecs", 2),
                record(0, 220, "codecs", 1),
                record(220, 451, "encodings.aliases", 1),
                record(0, 1259, "encodings", 0),
                record(0, 1259, "__main__", 0),
            ]
        );
    }

    #[test]
    fn test_dedent_across_multiple_levels() {
        let input = "\
import time:        10 |         10 |       c
import time:        20 |         30 |     b
import time:         5 |         40 | a
import time:         7 |          7 | d
";
        assert_eq!(
            records(input),
            vec![
                record(0, 10, "c", 3),
                record(0, 30, "b", 2),
                record(0, 40, "a", 0),
                record(40, 7, "d", 0),
                record(0, 47, "__main__", 0),
            ]
        );
    }

    #[test]
    fn test_siblings_are_contiguous_and_intervals_bounded() {
        let input = "\
import time:       226 |        226 |       types
import time:        43 |         43 |         _operator
import time:       287 |        329 |       operator
import time:       957 |       3610 |     enum
";
        let recs = records(input);
        let root = recs.last().expect("synthetic root");
        assert_eq!(root.name, "__main__");

        // Consecutive siblings at a fixed depth tile the parent span
        let at_depth_3: Vec<_> = recs.iter().filter(|r| r.depth == 3).collect();
        assert_eq!(at_depth_3[0].start_us + at_depth_3[0].duration_us, at_depth_3[1].start_us);

        for rec in &recs {
            assert!(
                rec.start_us + rec.duration_us <= root.duration_us,
                "{} overruns the trace span",
                rec.name
            );
        }
    }

    #[test]
    fn test_child_interval_nests_inside_parent_span() {
        let input = "\
import time:       101 |        101 |   _io
import time:        22 |         22 |   marshal
import time:       275 |        275 |   posix
import time:       427 |        824 | _frozen_importlib_external
";
        let recs = records(input);
        let parent = recs
            .iter()
            .find(|r| r.name == "_frozen_importlib_external")
            .expect("parent");
        for child in recs.iter().filter(|r| r.depth == 1) {
            assert!(child.start_us >= parent.start_us);
            assert!(child.start_us + child.duration_us <= parent.start_us + parent.duration_us);
        }
    }

    #[test]
    fn test_reconstruction_is_deterministic() {
        let input = "\
import time:       609 |        609 |   time
import time:        90 |        699 | zipimport
import time:        45 |         45 | faulthandler
";
        assert_eq!(records(input), records(input));
    }

    #[test]
    fn test_iterator_is_fused_after_synthetic_root() {
        let mut iter = reconstruct("".lines());
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
