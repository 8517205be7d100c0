use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::executor::RunOptions;
use crate::fs::write_lines;
use crate::report::{Report, Status};

pub(crate) mod confirm_action;
pub(crate) mod guarded_remove;
pub(crate) mod remove_block;
pub(crate) mod remove_lines;

/// Final step shared by every edit: show what will be removed, honour dry-run
/// and confirmation, then write.
async fn finish(path: &Path, lines: &[String], report: Report, options: &RunOptions) -> Result<Report> {
    let stdin = io::stdin();
    finish_with(path, lines, report, options, &mut io::stdout(), &mut stdin.lock())
}

fn finish_with(
    path: &Path,
    lines: &[String],
    mut report: Report,
    options: &RunOptions,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<Report> {
    if !options.quiet {
        report.write_preview(out)?;
    }
    if report.status == Status::Aborted {
        return Ok(report);
    }

    report.status = if options.dry_run {
        tracing::debug!(path = %path.display(), "dry run, skipping write");
        Status::DryRun
    } else if options.confirm && !confirm_action::execute(path, out, input)? {
        tracing::debug!(path = %path.display(), "write declined");
        Status::Declined
    } else {
        write_lines(path, lines)?;
        Status::Written
    };

    if report.status == Status::Written {
        if let Some(guard) = report.guard.as_mut() {
            guard.state = guard.state.written();
        }
    }
    Ok(report)
}
