//! Directory skeleton of a generated project

use std::fs;
use std::path::{Path, PathBuf};

use super::report::{Action, GenerationReport};
use crate::error::{GenerationError, GenerationResult};
use crate::paths;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    include_startup: bool,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, include_startup: bool) -> Self {
        Self {
            root: root.into(),
            include_startup,
        }
    }

    /// Every directory below the root, parents before children
    pub fn dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = paths::LAYOUT_DIRS
            .iter()
            .map(|dir| paths::resolve(&self.root, dir))
            .collect();
        if self.include_startup {
            dirs.push(paths::resolve(&self.root, paths::STARTUP_DIR));
        }
        dirs
    }

    /// Create the root and every layout directory. Existing directories are
    /// fine.
    pub fn create(&self, report: &mut GenerationReport) -> GenerationResult<()> {
        create_dir(&self.root, report)?;
        for dir in self.dirs() {
            create_dir(&dir, report)?;
        }
        Ok(())
    }
}

pub(crate) fn create_dir(path: &Path, report: &mut GenerationReport) -> GenerationResult<()> {
    if path.is_dir() {
        report.record(Action::ExistingDir(path.to_path_buf()));
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|source| GenerationError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "created directory");
    report.record(Action::CreatedDir(path.to_path_buf()));
    Ok(())
}
