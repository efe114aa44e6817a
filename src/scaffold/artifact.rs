//! Artifacts and the single routine that writes them

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::report::{Action, GenerationReport};
use crate::error::{GenerationError, GenerationResult};
use crate::paths;
use crate::templates::TemplateId;

/// What happens when the destination already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Generator-owned file, replaced on every run
    AlwaysOverwrite,
    /// User-owned once written, never touched again
    SkipIfExists,
}

/// How the template text becomes file content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Rendered,
    Verbatim,
}

/// One file produced from a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// '/' separated path below the project root
    pub relative_path: &'static str,
    pub template: TemplateId,
    pub policy: WritePolicy,
}

impl GeneratedArtifact {
    pub const fn new(relative_path: &'static str, template: TemplateId, policy: WritePolicy) -> Self {
        Self {
            relative_path,
            template,
            policy,
        }
    }

    pub fn content(&self) -> Content {
        if self.template.is_verbatim() {
            Content::Verbatim
        } else {
            Content::Rendered
        }
    }
}

/// Write `relative_path` under `root` according to `policy`.
///
/// `produce` is only called when the file is actually written, so a skipped
/// artifact never touches its template.
pub(crate) fn write_file<F>(
    root: &Path,
    relative_path: &str,
    policy: WritePolicy,
    report: &mut GenerationReport,
    produce: F,
) -> GenerationResult<()>
where
    F: FnOnce() -> GenerationResult<String>,
{
    let path = paths::resolve(root, relative_path);
    let existed = path.exists();

    if existed && policy == WritePolicy::SkipIfExists {
        tracing::debug!(path = %path.display(), "exists, skipping");
        report.record(Action::Skipped(path));
        return Ok(());
    }

    let content = produce()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenerationError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&path, content).map_err(|source| GenerationError::FileWriteFailed {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), overwrite = existed, "wrote file");
    report.record(if existed {
        Action::Overwrote(path)
    } else {
        Action::Created(path)
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn report_for(root: &Path) -> GenerationReport {
        GenerationReport::new(root.to_path_buf(), false)
    }

    #[test]
    fn test_skip_if_exists_keeps_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("main.c");
        fs::write(&path, "custom").unwrap();

        let mut report = report_for(tmp.path());
        write_file(tmp.path(), "main.c", WritePolicy::SkipIfExists, &mut report, || {
            panic!("content must not be produced for a skipped file")
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");
        assert_eq!(report.actions, vec![Action::Skipped(path)]);
    }

    #[test]
    fn test_always_overwrite_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Makefile");
        fs::write(&path, "stale").unwrap();

        let mut report = report_for(tmp.path());
        write_file(tmp.path(), "Makefile", WritePolicy::AlwaysOverwrite, &mut report, || {
            Ok("fresh".to_string())
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
        assert_eq!(report.actions, vec![Action::Overwrote(path)]);
    }

    #[test]
    fn test_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let mut report = report_for(tmp.path());
        write_file(tmp.path(), ".vscode/tasks.json", WritePolicy::SkipIfExists, &mut report, || {
            Ok("{}".to_string())
        })
        .unwrap();

        let path = tmp.path().join(".vscode").join("tasks.json");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
        assert_eq!(report.actions, vec![Action::Created(path)]);
    }

    #[test]
    fn test_write_into_file_path_fails_with_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("srcs"), "not a directory").unwrap();

        let mut report = report_for(tmp.path());
        let err = write_file(tmp.path(), "srcs/main.c", WritePolicy::SkipIfExists, &mut report, || {
            Ok(String::new())
        })
        .unwrap_err();

        assert!(matches!(
            err,
            GenerationError::DirectoryCreationFailed { .. } | GenerationError::FileWriteFailed { .. }
        ));
        assert!(report.actions.is_empty());
    }

    #[test]
    fn test_policy_serialization() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            policy: WritePolicy,
        }
        let text = toml::to_string(&Wrapper {
            policy: WritePolicy::AlwaysOverwrite,
        })
        .unwrap();
        assert_eq!(text.trim(), "policy = \"always-overwrite\"");
        let parsed: Wrapper = toml::from_str("policy = \"skip-if-exists\"").unwrap();
        assert_eq!(parsed.policy, WritePolicy::SkipIfExists);
    }
}
