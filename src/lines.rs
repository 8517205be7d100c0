//! Line ranges, guard markers and the excise logic shared by every edit.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EditError;

/// Inclusive, 1-based span of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    start_line: usize,
    end_line: usize,
}

impl LineRange {
    pub fn new(start_line: usize, end_line: usize) -> Result<Self, EditError> {
        if start_line == 0 || start_line > end_line {
            return Err(EditError::InvalidRange {
                start: start_line,
                end: end_line,
            });
        }
        Ok(Self { start_line, end_line })
    }

    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn start_index(&self) -> usize {
        self.start_line - 1
    }

    pub fn end_index(&self) -> usize {
        self.end_line - 1
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index()..=self.end_index()
    }

    pub fn len(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    pub fn check_bounds(&self, path: &Path, total: usize) -> Result<(), EditError> {
        if self.end_line > total {
            return Err(EditError::OutOfBounds {
                path: path.to_path_buf(),
                range: *self,
                total,
            });
        }
        Ok(())
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_line, self.end_line)
    }
}

impl FromStr for LineRange {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || EditError::UnparsableRange {
            input: s.to_string(),
        };
        let parse = |part: &str| part.trim().parse::<usize>().map_err(|_| unparsable());

        match s.split_once(|c: char| c == '-' || c == ':') {
            Some((start, end)) => LineRange::new(parse(start)?, parse(end)?),
            None => {
                let line = parse(s)?;
                LineRange::new(line, line)
            }
        }
    }
}

/// Opening and closing substrings expected at the edges of a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Markers {
    pub const DEFAULT_OPEN: &'static str = "BentoGridItem";
    pub const DEFAULT_CLOSE: &'static str = "</BentoGridItem>";

    /// An empty marker would match every line, so both must be non-empty.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, EditError> {
        let (open, close) = (open.into(), close.into());
        if open.is_empty() || close.is_empty() {
            return Err(EditError::EmptyMarker);
        }
        Ok(Self { open, close })
    }

    pub fn matches(&self, first: &str, last: &str) -> bool {
        first.contains(&self.open) && last.contains(&self.close)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            open: Self::DEFAULT_OPEN.to_string(),
            close: Self::DEFAULT_CLOSE.to_string(),
        }
    }
}

/// Progress of a guarded edit. `Aborted` and `Written` are terminal.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Unverified,
    Verified,
    Aborted,
    Written,
}

impl GuardState {
    pub fn verify(self, markers: &Markers, first: &str, last: &str) -> Self {
        match self {
            GuardState::Unverified if markers.matches(first, last) => GuardState::Verified,
            GuardState::Unverified => GuardState::Aborted,
            other => other,
        }
    }

    pub fn written(self) -> Self {
        match self {
            GuardState::Verified => GuardState::Written,
            other => other,
        }
    }
}

/// Returns `lines` without the ones in `range`. The range must already be in bounds.
pub fn excise(lines: &[String], range: &LineRange) -> Vec<String> {
    let mut kept = Vec::with_capacity(lines.len().saturating_sub(range.len()));
    kept.extend_from_slice(&lines[..range.start_index()]);
    kept.extend_from_slice(&lines[range.end_index() + 1..]);
    kept
}

/// Finds every span that starts on a line containing `markers.open` and ends on
/// the line where the count of open blocks drops back to zero.
///
/// Each line contributes its openers (counted once its closing markers are cut out,
/// since the closer usually contains the opener) minus its closers, so a one-line
/// block nested inside another leaves the depth unchanged. Stray closers at depth
/// zero and openers left unclosed at end of file produce no span.
pub fn locate_blocks(lines: &[String], markers: &Markers) -> Vec<LineRange> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, line) in lines.iter().enumerate() {
        let closes = line.matches(markers.close.as_str()).count();
        let opens = line
            .replace(&markers.close, "")
            .matches(markers.open.as_str())
            .count();

        if depth == 0 {
            if opens == 0 {
                continue;
            }
            start = idx;
        } else if opens == 0 && closes == 0 {
            continue;
        }

        depth = (depth + opens).saturating_sub(closes);
        if depth == 0 {
            blocks.push(LineRange {
                start_line: start + 1,
                end_line: idx + 1,
            });
        }
    }
    blocks
}
