//! Named edits loaded from TOML, layered over the built-in ones.
//!
//! ```toml
//! [edits.home-cleanup]
//! action = "remove_lines"
//! path = "src/pages/Home.tsx"
//! start_line = 484
//! end_line = 508
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EditError;
use crate::executor::Edit;
use crate::lines::Markers;

pub const LOCAL_CONFIG_FILE: &str = "linecut.toml";
const HOME_PAGE: &str = "src/pages/Home.tsx";

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub edits: BTreeMap<String, Edit>,
}

impl Config {
    /// The two page cleanups this tool was first written for.
    pub fn builtin() -> Self {
        let markers = Markers::default();
        let mut edits = BTreeMap::new();
        edits.insert(
            "remove-lines".to_string(),
            Edit::RemoveLines {
                path: HOME_PAGE.to_string(),
                start_line: 484,
                end_line: 508,
            },
        );
        edits.insert(
            "guarded-remove".to_string(),
            Edit::GuardedRemove {
                path: HOME_PAGE.to_string(),
                start_line: 485,
                end_line: 508,
                open_marker: markers.open,
                close_marker: markers.close,
            },
        );
        Config { edits }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Built-ins overlaid with the first config file found: the explicit one,
    /// then `./linecut.toml`, then `<config dir>/linecut/config.toml`.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let source = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::candidates().into_iter().find(|p| p.is_file()),
        };

        let mut config = Self::builtin();
        if let Some(path) = source {
            tracing::debug!(path = %path.display(), "loading config");
            config.merge(Self::from_file(&path)?);
        }
        Ok(config)
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("linecut").join("config.toml"));
        }
        paths
    }

    pub fn merge(&mut self, other: Config) {
        self.edits.extend(other.edits);
    }

    pub fn get(&self, name: &str) -> Result<&Edit, EditError> {
        self.edits.get(name).ok_or_else(|| EditError::UnknownEdit {
            name: name.to_string(),
        })
    }
}
