//! Error types for project generation
//!
//! Every filesystem fault carries the path it happened on. A failed step
//! aborts the rest of the run; files written by earlier steps stay in place.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for scaffolding operations
pub type GenerationResult<T> = Result<T, GenerationError>;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Project name is empty or not a single safe path segment
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: &'static str },

    #[error("failed to create directory {}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template file is missing from a template directory
    #[error("template '{name}' not found (looked for {})", searched.display())]
    MissingDependencyArtifact { name: String, searched: PathBuf },

    #[error("failed to read template '{name}' from {}", path.display())]
    TemplateRead {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render template '{name}'")]
    TemplateRender {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("failed to serialize {name}")]
    Json {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl GenerationError {
    pub(crate) fn invalid_name(name: &str, reason: &'static str) -> Self {
        GenerationError::InvalidProjectName {
            name: name.to_string(),
            reason,
        }
    }
}
