use std::path::PathBuf;

use crate::lines::LineRange;

/// Errors raised by the edit logic itself, as opposed to I/O or config failures.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditError {
    #[error("Invalid line range {start}-{end}: lines are 1-based and start must not exceed end")]
    InvalidRange { start: usize, end: usize },

    #[error("Invalid line range '{input}': expected START-END, START:END or a single line number")]
    UnparsableRange { input: String },

    #[error("Line range {range} is out of bounds for '{}' which has {total} lines", .path.display())]
    OutOfBounds {
        path: PathBuf,
        range: LineRange,
        total: usize,
    },

    #[error("No block opened by '{open}' and closed by '{close}' found in '{}'", .path.display())]
    BlockNotFound {
        path: PathBuf,
        open: String,
        close: String,
    },

    #[error("Found {} blocks in '{}' ({}), pass --occurrence to pick one", .blocks.len(), .path.display(), format_ranges(.blocks))]
    AmbiguousBlock { path: PathBuf, blocks: Vec<LineRange> },

    #[error("Occurrence {occurrence} requested but only {found} blocks found in '{}'", .path.display())]
    OccurrenceOutOfRange {
        path: PathBuf,
        occurrence: usize,
        found: usize,
    },

    #[error("Guard markers must not be empty")]
    EmptyMarker,

    #[error("Unknown edit '{name}', run `linecut list` to see the available ones")]
    UnknownEdit { name: String },
}

fn format_ranges(ranges: &[LineRange]) -> String {
    ranges
        .iter()
        .map(|r| format!("lines {}", r))
        .collect::<Vec<_>>()
        .join(", ")
}
