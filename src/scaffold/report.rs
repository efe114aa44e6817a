//! Record of what one generation run did

use std::path::{Path, PathBuf};

/// One filesystem effect of a run, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreatedDir(PathBuf),
    ExistingDir(PathBuf),
    Created(PathBuf),
    Overwrote(PathBuf),
    Skipped(PathBuf),
}

impl Action {
    pub fn path(&self) -> &Path {
        match self {
            Action::CreatedDir(path)
            | Action::ExistingDir(path)
            | Action::Created(path)
            | Action::Overwrote(path)
            | Action::Skipped(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub project_root: PathBuf,
    pub include_startup: bool,
    pub actions: Vec<Action>,
}

impl GenerationReport {
    pub fn new(project_root: PathBuf, include_startup: bool) -> Self {
        Self {
            project_root,
            include_startup,
            actions: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Files written by this run, new or replaced
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|action| match action {
            Action::Created(path) | Action::Overwrote(path) => Some(path.as_path()),
            _ => None,
        })
    }

    /// Files left alone because they already existed
    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().filter_map(|action| match action {
            Action::Skipped(path) => Some(path.as_path()),
            _ => None,
        })
    }

    /// The action recorded for `path`, if any
    pub fn action_for(&self, path: &Path) -> Option<&Action> {
        self.actions.iter().find(|action| action.path() == path)
    }

    /// Path relative to the project root, for display
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.project_root).unwrap_or(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_and_skipped() {
        let root = PathBuf::from("/out/Blinky");
        let mut report = GenerationReport::new(root.clone(), false);
        report.record(Action::CreatedDir(root.join("srcs")));
        report.record(Action::Created(root.join("Makefile")));
        report.record(Action::Overwrote(root.join(".gitignore")));
        report.record(Action::Skipped(root.join("srcs").join("main.c")));

        let written: Vec<_> = report.written().collect();
        assert_eq!(written, vec![root.join("Makefile"), root.join(".gitignore")]);
        let skipped: Vec<_> = report.skipped().collect();
        assert_eq!(skipped, vec![root.join("srcs").join("main.c")]);
        assert_eq!(
            report.relative(&root.join("srcs").join("main.c")),
            Path::new("srcs").join("main.c")
        );
    }
}
