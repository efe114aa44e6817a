//! Template sources and rendering
//!
//! Template text comes from a [`TemplateSource`]: either the templates
//! compiled into the binary ([`EmbeddedTemplates`]) or a directory of
//! template files ([`DirectoryTemplates`]). Rendering is the same for both.

mod directory;
mod embedded;

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tera::{Context, Tera};

use crate::config::ToolchainSection;
use crate::error::{GenerationError, GenerationResult};

pub use directory::DirectoryTemplates;
pub use embedded::EmbeddedTemplates;

/// Every template the scaffolder knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    RootMakefile,
    SrcsMakefile,
    MainC,
    DefinitionsH,
    Gitignore,
    Readme,
    Startup,
}

impl TemplateId {
    pub const ALL: [TemplateId; 7] = [
        TemplateId::RootMakefile,
        TemplateId::SrcsMakefile,
        TemplateId::MainC,
        TemplateId::DefinitionsH,
        TemplateId::Gitignore,
        TemplateId::Readme,
        TemplateId::Startup,
    ];

    /// Short name used in logs and errors
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::RootMakefile => "root-makefile",
            TemplateId::SrcsMakefile => "srcs-makefile",
            TemplateId::MainC => "main-c",
            TemplateId::DefinitionsH => "definitions-h",
            TemplateId::Gitignore => "gitignore",
            TemplateId::Readme => "readme",
            TemplateId::Startup => "startup",
        }
    }

    /// File name inside a template directory
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateId::RootMakefile => "Makefile.root.tera",
            TemplateId::SrcsMakefile => "Makefile.srcs.tera",
            TemplateId::MainC => "main.c.tera",
            TemplateId::DefinitionsH => "definitions.h.tera",
            TemplateId::Gitignore => "gitignore.tera",
            TemplateId::Readme => "README.md.tera",
            TemplateId::Startup => "startup.S",
        }
    }

    /// Verbatim templates are copied byte for byte, never rendered
    pub fn is_verbatim(self) -> bool {
        matches!(self, TemplateId::Startup)
    }
}

/// Provider of raw template text
pub trait TemplateSource {
    /// Human-readable origin, shown in the generation header
    fn describe(&self) -> String;

    /// Raw text of one template
    fn load(&self, id: TemplateId) -> GenerationResult<Cow<'_, str>>;
}

// =============================================================================
// Rendering
// =============================================================================

/// Values substituted into rendered templates
#[derive(Debug, Clone, Serialize)]
pub struct TemplateValues<'a> {
    pub project_name: &'a str,
    pub device: &'a str,
    pub include_startup: bool,
    pub definitions_header: bool,
    pub windows_root: &'a str,
    pub unix_root: &'a str,
    pub xc32_version: &'a str,
    pub mplabx_version: &'a str,
    pub dfp_pack: &'a str,
    pub dfp_version: &'a str,
    pub bootloader: &'a str,
    pub host_os: &'a str,
}

impl<'a> TemplateValues<'a> {
    pub fn new(
        project_name: &'a str,
        device: &'a str,
        include_startup: bool,
        definitions_header: bool,
        toolchain: &'a ToolchainSection,
    ) -> Self {
        Self {
            project_name,
            device,
            include_startup,
            definitions_header,
            windows_root: &toolchain.windows_root,
            unix_root: &toolchain.unix_root,
            xc32_version: &toolchain.xc32_version,
            mplabx_version: &toolchain.mplabx_version,
            dfp_pack: &toolchain.dfp_pack,
            dfp_version: &toolchain.dfp_version,
            bootloader: &toolchain.bootloader,
            host_os: std::env::consts::OS,
        }
    }

    fn to_context(&self, id: TemplateId) -> GenerationResult<Context> {
        Context::from_serialize(self).map_err(|source| GenerationError::TemplateRender {
            name: id.name().to_string(),
            source,
        })
    }
}

/// Produce the final content of one template.
///
/// Verbatim templates are returned unchanged.
pub fn render(id: TemplateId, text: &str, values: &TemplateValues<'_>) -> GenerationResult<String> {
    if id.is_verbatim() {
        return Ok(text.to_string());
    }

    let render_err = |source| GenerationError::TemplateRender {
        name: id.name().to_string(),
        source,
    };

    let mut tera = Tera::default();
    tera.add_raw_template(id.name(), text).map_err(render_err)?;
    let context = values.to_context(id)?;
    tera.render(id.name(), &context).map_err(render_err)
}

// =============================================================================
// Export
// =============================================================================

/// Outcome of exporting the embedded templates
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write the embedded templates into `dir` under the file names
/// [`DirectoryTemplates`] reads.
///
/// Existing files are kept unless `force` is set.
pub fn export_embedded(dir: &Path, force: bool) -> GenerationResult<ExportReport> {
    fs::create_dir_all(dir).map_err(|source| GenerationError::DirectoryCreationFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut report = ExportReport::default();
    for id in TemplateId::ALL {
        let path = dir.join(id.file_name());
        if path.exists() && !force {
            tracing::debug!(path = %path.display(), "template exists, keeping it");
            report.skipped.push(path);
            continue;
        }

        fs::write(&path, EmbeddedTemplates::text(id)).map_err(|source| {
            GenerationError::FileWriteFailed {
                path: path.clone(),
                source,
            }
        })?;
        report.written.push(path);
    }

    Ok(report)
}
