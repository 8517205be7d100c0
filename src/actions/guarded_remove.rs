use anyhow::Result;

use crate::executor::RunOptions;
use crate::fs::{expand_home, read_lines};
use crate::lines::{excise, GuardState, LineRange, Markers};
use crate::report::{GuardCheck, Report, Status, Variant};

pub(crate) async fn execute(
    path: &String,
    range: LineRange,
    markers: &Markers,
    options: &RunOptions,
) -> Result<Report> {
    let expanded_path = expand_home(path)?;
    let lines = read_lines(&expanded_path)?;
    range.check_bounds(&expanded_path, lines.len())?;

    let first = &lines[range.start_index()];
    let last = &lines[range.end_index()];
    let state = GuardState::Unverified.verify(markers, first, last);
    tracing::debug!(%range, ?state, "checked guard markers");

    let guard = Some(GuardCheck {
        first_line: first.trim().to_string(),
        last_line: last.trim().to_string(),
        markers: markers.clone(),
        state,
    });

    if state == GuardState::Aborted {
        let report = Report {
            path: path.clone(),
            variant: Variant::Guarded,
            status: Status::Aborted,
            range,
            lines_before: lines.len(),
            lines_after: lines.len(),
            removed: Vec::new(),
            guard,
        };
        return super::finish(&expanded_path, &lines, report, options).await;
    }

    let new_lines = excise(&lines, &range);
    let report = Report {
        path: path.clone(),
        variant: Variant::Guarded,
        status: Status::Pending,
        range,
        lines_before: lines.len(),
        lines_after: new_lines.len(),
        removed: Vec::new(),
        guard,
    };
    super::finish(&expanded_path, &new_lines, report, options).await
}
