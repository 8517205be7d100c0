use anyhow::Result;

use crate::error::EditError;
use crate::executor::RunOptions;
use crate::fs::{expand_home, read_lines};
use crate::lines::{excise, locate_blocks, GuardState, Markers};
use crate::report::{GuardCheck, Report, Status, Variant};

/// Removes the block delimited by `markers`, located by content rather than by line number.
/// `occurrence` is 1-based and only required when several blocks match.
pub(crate) async fn execute(
    path: &String,
    markers: &Markers,
    occurrence: Option<usize>,
    options: &RunOptions,
) -> Result<Report> {
    let expanded_path = expand_home(path)?;
    let lines = read_lines(&expanded_path)?;
    let blocks = locate_blocks(&lines, markers);
    tracing::debug!(found = blocks.len(), "located blocks");

    let range = match (blocks.as_slice(), occurrence) {
        ([], _) => {
            return Err(EditError::BlockNotFound {
                path: expanded_path,
                open: markers.open.clone(),
                close: markers.close.clone(),
            }
            .into())
        }
        ([only], None) => *only,
        (_, None) => {
            return Err(EditError::AmbiguousBlock {
                path: expanded_path,
                blocks: blocks.clone(),
            }
            .into())
        }
        (found, Some(n)) => match n.checked_sub(1).and_then(|idx| found.get(idx)) {
            Some(block) => *block,
            None => {
                return Err(EditError::OccurrenceOutOfRange {
                    path: expanded_path,
                    occurrence: n,
                    found: found.len(),
                }
                .into())
            }
        },
    };

    let new_lines = excise(&lines, &range);
    let report = Report {
        path: path.clone(),
        variant: Variant::Block,
        status: Status::Pending,
        range,
        lines_before: lines.len(),
        lines_after: new_lines.len(),
        removed: Vec::new(),
        guard: Some(GuardCheck {
            first_line: lines[range.start_index()].trim().to_string(),
            last_line: lines[range.end_index()].trim().to_string(),
            markers: markers.clone(),
            state: GuardState::Verified,
        }),
    };
    super::finish(&expanded_path, &new_lines, report, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::LineRange;
    use std::fs;
    use tempfile::tempdir;

    const PAGE: &str = "\
<BentoGrid>
  <BentoGridItem title=\"A\">
    <p>a</p>
  </BentoGridItem>
  <BentoGridItem title=\"B\">
    <p>b</p>
  </BentoGridItem>
</BentoGrid>
";

    #[tokio::test]
    async fn test_removes_selected_occurrence() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Home.tsx");
        fs::write(&path, PAGE)?;

        let report = execute(
            &path.display().to_string(),
            &Markers::default(),
            Some(2),
            &RunOptions::default(),
        )
        .await?;

        assert_eq!(report.status, Status::Written);
        assert_eq!(report.range, LineRange::new(5, 7)?);
        assert_eq!(report.lines_before, 8);
        assert_eq!(report.lines_after, 5);
        assert_eq!(
            fs::read_to_string(&path)?,
            "<BentoGrid>\n  <BentoGridItem title=\"A\">\n    <p>a</p>\n  </BentoGridItem>\n</BentoGrid>\n"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_single_block_needs_no_occurrence() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Home.tsx");
        fs::write(&path, "<main>\n<BentoGridItem>\nx\n</BentoGridItem>\n</main>\n")?;

        let report = execute(&path.display().to_string(), &Markers::default(), None, &RunOptions::default()).await?;

        assert_eq!(report.range, LineRange::new(2, 4)?);
        assert_eq!(fs::read_to_string(&path)?, "<main>\n</main>\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_ambiguous_blocks_are_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Home.tsx");
        fs::write(&path, PAGE)?;

        let err = execute(&path.display().to_string(), &Markers::default(), None, &RunOptions::default())
            .await
            .unwrap_err();

        match err.downcast_ref::<EditError>() {
            Some(EditError::AmbiguousBlock { blocks, .. }) => {
                assert_eq!(blocks, &vec![LineRange::new(2, 4)?, LineRange::new(5, 7)?]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path)?, PAGE);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_block_and_bad_occurrence() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Home.tsx");
        fs::write(&path, PAGE)?;
        let path_str = path.display().to_string();

        let err = execute(&path_str, &Markers::new("<Card", "</Card>")?, None, &RunOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<EditError>(), Some(EditError::BlockNotFound { .. })));

        for occurrence in [0, 3] {
            let err = execute(&path_str, &Markers::default(), Some(occurrence), &RunOptions::default())
                .await
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<EditError>(),
                Some(EditError::OccurrenceOutOfRange { found: 2, .. })
            ));
        }
        assert_eq!(fs::read_to_string(&path)?, PAGE);
        Ok(())
    }
}
