//! Templates read from a directory on disk
//!
//! The directory holds one file per [`TemplateId`], named by
//! [`TemplateId::file_name`]. `pic32gen templates export` produces a
//! complete set to start from.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{TemplateId, TemplateSource};
use crate::error::{GenerationError, GenerationResult};

#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl TemplateSource for DirectoryTemplates {
    fn describe(&self) -> String {
        format!("templates from {}", self.root.display())
    }

    fn load(&self, id: TemplateId) -> GenerationResult<Cow<'_, str>> {
        let path = self.root.join(id.file_name());
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Cow::Owned(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::error!(template = id.name(), path = %path.display(), "template file missing");
                Err(GenerationError::MissingDependencyArtifact {
                    name: id.file_name().to_string(),
                    searched: path,
                })
            }
            Err(source) => Err(GenerationError::TemplateRead {
                name: id.name().to_string(),
                path,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{export_embedded, EmbeddedTemplates};
    use tempfile::TempDir;

    #[test]
    fn test_missing_template_is_reported() {
        let tmp = TempDir::new().unwrap();
        let source = DirectoryTemplates::new(tmp.path());

        let err = source.load(TemplateId::Startup).unwrap_err();
        match err {
            GenerationError::MissingDependencyArtifact { name, searched } => {
                assert_eq!(name, "startup.S");
                assert_eq!(searched, tmp.path().join("startup.S"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_exported_templates_match_embedded() {
        let tmp = TempDir::new().unwrap();
        export_embedded(tmp.path(), false).unwrap();

        let source = DirectoryTemplates::new(tmp.path());
        for id in TemplateId::ALL {
            assert_eq!(source.load(id).unwrap(), EmbeddedTemplates::text(id));
        }
    }

    #[test]
    fn test_custom_template_is_used() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("gitignore.tera"), "bins/\n").unwrap();

        let source = DirectoryTemplates::new(tmp.path());
        assert_eq!(source.load(TemplateId::Gitignore).unwrap(), "bins/\n");
        assert!(source.describe().contains(&tmp.path().display().to_string()));
    }
}
