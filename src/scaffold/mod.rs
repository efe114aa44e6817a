//! Project scaffolding for PIC32MZ / XC32 firmware
//!
//! Public interface lives here; the generation steps are in `internal`.
//!
//! # Example
//!
//! ```no_run
//! use pic32gen::scaffold::{self, GenerationRequest};
//!
//! let request = GenerationRequest::new("Blinky")
//!     .device("32MZ2048EFH064")
//!     .output_root("/tmp/out")
//!     .include_startup(true);
//!
//! let report = scaffold::generate(&request)?;
//! println!("Project at {}", report.project_root.display());
//! # Ok::<(), pic32gen::GenerationError>(())
//! ```

mod artifact;
mod internal;
mod layout;
mod report;
mod validation;

use std::path::{Path, PathBuf};

use crate::config::{GeneratorConfig, TemplateStrategy, ToolchainSection, DEFAULT_DEVICE};
use crate::error::GenerationResult;
use crate::paths;
use crate::templates::{DirectoryTemplates, EmbeddedTemplates, TemplateSource};

pub use artifact::{Content, GeneratedArtifact, WritePolicy};
pub use layout::ProjectLayout;
pub use report::{Action, GenerationReport};
pub use validation::validate_project_name;

/// Parameters of one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub project_name: String,
    pub device: String,
    pub output_root: PathBuf,
    pub include_startup: bool,
}

impl GenerationRequest {
    /// Request with the default device, the current directory as output root
    /// and no startup support
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            device: DEFAULT_DEVICE.to_string(),
            output_root: PathBuf::from("."),
            include_startup: false,
        }
    }

    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    pub fn output_root(mut self, output_root: impl AsRef<Path>) -> Self {
        self.output_root = output_root.as_ref().to_path_buf();
        self
    }

    pub fn include_startup(mut self, include_startup: bool) -> Self {
        self.include_startup = include_startup;
        self
    }

    /// `<output_root>/<project_name>`
    pub fn project_root(&self) -> PathBuf {
        paths::project_root(&self.output_root, &self.project_name)
    }
}

/// Output choices that are not part of a single request
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldOptions {
    pub readme_policy: WritePolicy,
    pub definitions_header: bool,
    pub vscode: bool,
    pub toolchain: ToolchainSection,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

impl ScaffoldOptions {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            readme_policy: config.output.readme_policy,
            definitions_header: config.output.definitions_header,
            vscode: config.output.vscode,
            toolchain: config.toolchain.clone(),
        }
    }
}

/// Generates project skeletons from one template source
pub struct Scaffolder {
    source: Box<dyn TemplateSource>,
    options: ScaffoldOptions,
}

impl Scaffolder {
    pub fn new(source: Box<dyn TemplateSource>, options: ScaffoldOptions) -> Self {
        Self { source, options }
    }

    /// Embedded templates with default options
    pub fn embedded() -> Self {
        Self::new(Box::new(EmbeddedTemplates), ScaffoldOptions::default())
    }

    /// Template source and options as configured.
    ///
    /// A directory strategy without `templates.dir` falls back to
    /// `~/.pic32gen/templates/`.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let source: Box<dyn TemplateSource> = match config.templates.source {
            TemplateStrategy::Embedded => Box::new(EmbeddedTemplates),
            TemplateStrategy::Directory => {
                let dir = config
                    .templates
                    .dir
                    .clone()
                    .unwrap_or_else(paths::templates_dir);
                Box::new(DirectoryTemplates::new(dir))
            }
        };
        Self::new(source, ScaffoldOptions::from_config(config))
    }

    pub fn source(&self) -> &dyn TemplateSource {
        self.source.as_ref()
    }

    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    /// Run every generation step for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The project name is empty or not a single safe path segment
    /// - A directory or file cannot be created
    /// - A template is missing from a template directory, or fails to render
    ///
    /// Files written before the failing step are left in place; running
    /// again is safe. Use [`Scaffolder::generate_into`] to see what they were.
    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult<GenerationReport> {
        let mut report = GenerationReport::new(request.project_root(), request.include_startup);
        self.generate_into(request, &mut report)?;
        Ok(report)
    }

    /// Like [`Scaffolder::generate`], recording into `report` as it goes.
    ///
    /// On error `report` holds every action performed before the failing
    /// step.
    pub fn generate_into(
        &self,
        request: &GenerationRequest,
        report: &mut GenerationReport,
    ) -> GenerationResult<()> {
        internal::run(self, request, report)
    }
}

/// Generate a project with the embedded templates and default options
pub fn generate(request: &GenerationRequest) -> GenerationResult<GenerationReport> {
    Scaffolder::embedded().generate(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = GenerationRequest::new("Blinky");
        assert_eq!(request.device, "32MZ1024EFH064");
        assert_eq!(request.output_root, PathBuf::from("."));
        assert!(!request.include_startup);
        assert_eq!(request.project_root(), PathBuf::from(".").join("Blinky"));
    }

    #[test]
    fn test_from_config_directory_strategy() {
        let mut config = GeneratorConfig::default();
        config.templates.source = TemplateStrategy::Directory;
        config.templates.dir = Some(PathBuf::from("/srv/pic32/templates"));
        config.output.vscode = true;

        let scaffolder = Scaffolder::from_config(&config);
        assert!(scaffolder.source().describe().contains("/srv/pic32/templates"));
        assert!(scaffolder.options().vscode);
    }
}
