use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::io::Write;

use crate::lines::{GuardState, LineRange, Markers};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Unconditional,
    Guarded,
    Block,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Computed in memory, write not attempted yet.
    Pending,
    Written,
    DryRun,
    Aborted,
    Declined,
}

impl Status {
    /// Process exit status for a finished edit.
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Aborted => 2,
            Status::Pending => 1,
            Status::Written | Status::DryRun | Status::Declined => 0,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GuardCheck {
    pub first_line: String,
    pub last_line: String,
    pub markers: Markers,
    pub state: GuardState,
}

impl GuardCheck {
    pub fn passed(&self) -> bool {
        self.state != GuardState::Aborted
    }
}

/// What a single edit did, or would have done, to its file.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: String,
    pub variant: Variant,
    pub status: Status,
    pub range: LineRange,
    pub lines_before: usize,
    pub lines_after: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<GuardCheck>,
}

impl Report {
    /// Everything known before the write, in the order the edit performs its steps.
    pub fn render_preview(&self) -> Vec<String> {
        let mut out = Vec::new();
        let (start, end) = (self.range.start_line(), self.range.end_line());

        if let Some(guard) = &self.guard {
            out.push(format!("Line {}: {}", start, guard.first_line));
            out.push(format!("Line {}: {}", end, guard.last_line));
            if !guard.passed() {
                out.push("Lines did not match expected content. Aborting.".to_string());
                return out;
            }
            out.push("Found expected tags. Removing lines...".to_string());
        }

        out.push(format!("Total lines before: {}", self.lines_before));
        out.push(format!("Removing lines {} to {}", start, end));
        for line in &self.removed {
            out.push(format!("Removing: {}", line));
        }
        out.push(format!("Total lines after: {}", self.lines_after));
        out
    }

    pub fn status_line(&self) -> Option<&'static str> {
        match self.status {
            Status::Written => Some("File updated successfully."),
            Status::DryRun => Some("Dry run: file left unchanged."),
            Status::Declined => Some("Skipped: file left unchanged."),
            Status::Aborted | Status::Pending => None,
        }
    }

    pub fn write_preview(&self, out: &mut impl Write) -> Result<()> {
        for line in self.render_preview() {
            if line.starts_with("Removing: ") {
                writeln!(out, "{}", line.red())?;
            } else if line.starts_with("Lines did not match") {
                writeln!(out, "{}", line.yellow())?;
            } else {
                writeln!(out, "{}", line)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn print_status(&self) {
        match self.status_line() {
            Some(line) if self.status == Status::Written => println!("{}", line.green()),
            Some(line) => println!("{}", line),
            None => {}
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
