use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::actions::{guarded_remove, remove_block, remove_lines};
use crate::lines::{LineRange, Markers};
use crate::report::Report;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Edit {
    RemoveLines { path: String, start_line: usize, end_line: usize },
    GuardedRemove { path: String, start_line: usize, end_line: usize, open_marker: String, close_marker: String },
    RemoveBlock { path: String, open_marker: String, close_marker: String, occurrence: Option<usize> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub dry_run: bool,
    pub confirm: bool,
    /// Skip the human-readable preview, e.g. when the report is printed as JSON.
    pub quiet: bool,
}

impl Edit {
    pub fn path(&self) -> &str {
        match self {
            Edit::RemoveLines { path, .. }
            | Edit::GuardedRemove { path, .. }
            | Edit::RemoveBlock { path, .. } => path,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Edit::RemoveLines { path, start_line, end_line } => {
                format!("Remove lines {}-{} of '{}'", start_line, end_line, path)
            }
            Edit::GuardedRemove { path, start_line, end_line, open_marker, close_marker } => format!(
                "Remove lines {}-{} of '{}' if they open with '{}' and close with '{}'",
                start_line, end_line, path, open_marker, close_marker
            ),
            Edit::RemoveBlock { path, open_marker, close_marker, occurrence } => format!(
                "Remove block {}'{}' ... '{}' from '{}'",
                occurrence.map(|n| format!("#{} ", n)).unwrap_or_default(),
                open_marker,
                close_marker,
                path
            ),
        }
    }

    pub async fn execute(&self, options: &RunOptions) -> Result<Report> {
        tracing::debug!(path = self.path(), ?options, "executing edit");
        match self {
            Edit::RemoveLines { path, start_line, end_line } => {
                let range = LineRange::new(*start_line, *end_line)?;
                remove_lines::execute(path, range, options).await
            }
            Edit::GuardedRemove { path, start_line, end_line, open_marker, close_marker } => {
                let range = LineRange::new(*start_line, *end_line)?;
                let markers = Markers::new(open_marker.as_str(), close_marker.as_str())?;
                guarded_remove::execute(path, range, &markers, options).await
            }
            Edit::RemoveBlock { path, open_marker, close_marker, occurrence } => {
                let markers = Markers::new(open_marker.as_str(), close_marker.as_str())?;
                remove_block::execute(path, &markers, *occurrence, options).await
            }
        }
    }
}
