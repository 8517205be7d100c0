use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

pub(crate) fn expand_home(path: &str) -> Result<PathBuf> {
    let expanded_path = if let Some(rest) = path.strip_prefix("~/") {
        let home = env::var("HOME").context("Cannot expand '~': HOME is not set")?;
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    };
    Ok(expanded_path)
}

/// Reads the file as lines, each keeping its own terminator.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    tracing::debug!(path = %path.display(), lines = lines.len(), "read file");
    Ok(lines)
}

/// Replaces the file's content with `lines` through a sibling temp file and a rename,
/// so a failed write never leaves the target truncated.
///
/// Symlinks are followed, so the file they point to is the one replaced, and the
/// target's permission bits carry over to the new file.
pub(crate) fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve file: {}", path.display()))?;
    let permissions = fs::metadata(&target)
        .with_context(|| format!("Failed to read metadata: {}", target.display()))?
        .permissions();

    let temp_name = format!(
        ".{}.{}.tmp",
        target.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = target.with_file_name(temp_name);

    let written = write_temp(&temp_path, lines)
        .and_then(|_| {
            fs::set_permissions(&temp_path, permissions)
                .with_context(|| format!("Failed to set permissions: {}", temp_path.display()))
        })
        .and_then(|_| {
            fs::rename(&temp_path, &target)
                .with_context(|| format!("Failed to replace file: {}", target.display()))
        });
    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written?;

    tracing::debug!(path = %path.display(), lines = lines.len(), "wrote file");
    Ok(())
}

fn write_temp(temp_path: &Path, lines: &[String]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .with_context(|| format!("Failed to create temporary file: {}", temp_path.display()))?;
    file.write_all(lines.concat().as_bytes())
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to flush temporary file: {}", temp_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_expand_home() -> Result<()> {
        let home = env::var("HOME")?;
        assert_eq!(expand_home("~/src/pages/Home.tsx")?, PathBuf::from(home).join("src/pages/Home.tsx"));
        assert_eq!(expand_home("src/pages/Home.tsx")?, PathBuf::from("src/pages/Home.tsx"));
        Ok(())
    }

    #[test]
    fn test_read_lines_keeps_terminators() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mixed.tsx");
        fs::write(&path, "one\r\ntwo\nthree")?;

        assert_eq!(read_lines(&path)?, vec!["one\r\n", "two\n", "three"]);
        Ok(())
    }

    #[test]
    fn test_read_lines_empty_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.tsx");
        fs::write(&path, "")?;

        assert!(read_lines(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_lines_missing_file() {
        let result = read_lines(Path::new("definitely_missing_file.tsx"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_write_lines_replaces_content_and_cleans_up() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("Home.tsx");
        fs::write(&path, "old\ncontent\n")?;

        write_lines(&path, &["a\r\n".to_string(), "b".to_string()])?;

        assert_eq!(fs::read_to_string(&path)?, "a\r\nb");
        let leftovers: Vec<_> = fs::read_dir(dir.path())?
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_write_lines_keeps_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let path = dir.path().join("Home.tsx");
        fs::write(&path, "a\nb\n")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;

        write_lines(&path, &["a\n".to_string()])?;

        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path)?, "a\n");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_write_lines_through_symlink_edits_target() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("Home.tsx");
        let link = dir.path().join("Home.link.tsx");
        fs::write(&target, "a\nb\n")?;
        std::os::unix::fs::symlink(&target, &link)?;

        write_lines(&link, &["b\n".to_string()])?;

        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&target)?, "b\n");
        assert_eq!(fs::read_to_string(&link)?, "b\n");
        Ok(())
    }

    #[test]
    fn test_write_lines_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("Home.tsx");
        let result = write_lines(&path, &["x\n".to_string()]);
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
