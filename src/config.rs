//! Generator configuration stored in `~/.pic32gen/config.toml`
//!
//! All sections are optional; a missing file or section falls back to the
//! built-in defaults. Command-line flags override whatever is loaded here.
//!
//! ```toml
//! [defaults]
//! device = "32MZ2048EFH064"
//!
//! [toolchain]
//! xc32_version = "v4.60"
//!
//! [output]
//! readme_policy = "always-overwrite"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scaffold::WritePolicy;

/// Device used when none is given on the command line or in the config
pub const DEFAULT_DEVICE: &str = "32MZ1024EFH064";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write config {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize config")]
    Serialize(#[from] toml::ser::Error),
}

// =============================================================================
// Config Types
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default)]
    pub toolchain: ToolchainSection,
    #[serde(default)]
    pub templates: TemplatesSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsSection {
    /// Device part number written into the root Makefile
    #[serde(default = "default_device")]
    pub device: String,
    /// Generate startup assembly without passing --mikroc
    #[serde(default)]
    pub include_startup: bool,
}

fn default_device() -> String {
    DEFAULT_DEVICE.to_string()
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            device: default_device(),
            include_startup: false,
        }
    }
}

/// Toolchain locations rendered into the generated Makefiles.
///
/// The Windows and Unix roots are both written out; `make` picks one at build
/// time from `$(OS)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolchainSection {
    #[serde(default = "default_windows_root")]
    pub windows_root: String,
    #[serde(default = "default_unix_root")]
    pub unix_root: String,
    #[serde(default = "default_xc32_version")]
    pub xc32_version: String,
    #[serde(default = "default_mplabx_version")]
    pub mplabx_version: String,
    #[serde(default = "default_dfp_pack")]
    pub dfp_pack: String,
    #[serde(default = "default_dfp_version")]
    pub dfp_version: String,
    /// Bootloader invoked by `make flash`, relative to `bins/`
    #[serde(default = "default_bootloader")]
    pub bootloader: String,
}

fn default_windows_root() -> String {
    "C:/Program Files/Microchip".to_string()
}
fn default_unix_root() -> String {
    "/opt/microchip".to_string()
}
fn default_xc32_version() -> String {
    "v4.60".to_string()
}
fn default_mplabx_version() -> String {
    "v6.25".to_string()
}
fn default_dfp_pack() -> String {
    "PIC32MZ-EF_DFP".to_string()
}
fn default_dfp_version() -> String {
    "1.4.168".to_string()
}
fn default_bootloader() -> String {
    "../../MikroC_bootloader_lnx/bins/mikro_hb".to_string()
}

impl Default for ToolchainSection {
    fn default() -> Self {
        Self {
            windows_root: default_windows_root(),
            unix_root: default_unix_root(),
            xc32_version: default_xc32_version(),
            mplabx_version: default_mplabx_version(),
            dfp_pack: default_dfp_pack(),
            dfp_version: default_dfp_version(),
            bootloader: default_bootloader(),
        }
    }
}

impl ToolchainSection {
    /// Root for the platform this process runs on
    pub fn host_root(&self) -> &str {
        if cfg!(windows) {
            &self.windows_root
        } else {
            &self.unix_root
        }
    }

    /// XC32 `bin` directory on the host platform
    pub fn host_compiler_dir(&self) -> String {
        format!("{}/xc32/{}/bin", self.host_root(), self.xc32_version)
    }

    /// Device Family Pack directory on the host platform
    pub fn host_dfp_dir(&self) -> String {
        let mplabx = if cfg!(windows) { "MPLABX" } else { "mplabx" };
        format!(
            "{}/{}/{}/packs/Microchip/{}/{}",
            self.host_root(),
            mplabx,
            self.mplabx_version,
            self.dfp_pack,
            self.dfp_version
        )
    }
}

/// Where template text comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateStrategy {
    /// Templates compiled into the binary
    #[default]
    Embedded,
    /// Template files read from `templates.dir`
    Directory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatesSection {
    #[serde(default)]
    pub source: TemplateStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// README.md is user documentation by default and kept once written
    #[serde(default = "default_readme_policy")]
    pub readme_policy: WritePolicy,
    /// Emit incs/definitions.h and include it from main.c
    #[serde(default = "default_true")]
    pub definitions_header: bool,
    /// Emit .vscode/ tasks, launch and IntelliSense configuration
    #[serde(default)]
    pub vscode: bool,
}

fn default_readme_policy() -> WritePolicy {
    WritePolicy::SkipIfExists
}
fn default_true() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            readme_policy: default_readme_policy(),
            definitions_header: true,
            vscode: false,
        }
    }
}

// =============================================================================
// Load / Save
// =============================================================================

impl GeneratorConfig {
    /// Load configuration from `path`.
    ///
    /// Returns the default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the user config path (`~/.pic32gen/config.toml`)
    pub fn load_user() -> Result<Self, ConfigError> {
        Self::load(&crate::paths::config_path())
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
