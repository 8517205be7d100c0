use anyhow::Result;

use crate::executor::RunOptions;
use crate::fs::{expand_home, read_lines};
use crate::lines::{excise, LineRange};
use crate::report::{Report, Status, Variant};

pub(crate) async fn execute(path: &String, range: LineRange, options: &RunOptions) -> Result<Report> {
    let expanded_path = expand_home(path)?;
    let lines = read_lines(&expanded_path)?;
    range.check_bounds(&expanded_path, lines.len())?;

    let removed: Vec<String> = lines[range.indices()]
        .iter()
        .map(|line| line.trim().to_string())
        .collect();
    let new_lines = excise(&lines, &range);
    tracing::debug!(%range, before = lines.len(), after = new_lines.len(), "excised range");

    let report = Report {
        path: path.clone(),
        variant: Variant::Unconditional,
        status: Status::Pending,
        range,
        lines_before: lines.len(),
        lines_after: new_lines.len(),
        removed,
        guard: None,
    };
    super::finish(&expanded_path, &new_lines, report, options).await
}
