//! Single source of truth for the generated project layout.
//!
//! This module defines WHERE things live. It has no I/O and no validation.
//!
//! # Generated project
//!
//! ```text
//! <output_root>/<project_name>/
//! ├── Makefile                 # Root build file (always rewritten)
//! ├── README.md
//! ├── .gitignore               # Always rewritten
//! ├── .vscode/                 # Optional editor configuration
//! ├── srcs/
//! │   ├── Makefile             # Source tree build file (always rewritten)
//! │   ├── main.c
//! │   └── startup/startup.S    # Only with startup support
//! ├── incs/definitions.h
//! ├── objs/  bins/  other/  docs/
//! ```
//!
//! # Generator home (~/.pic32gen/)
//!
//! ```text
//! ~/.pic32gen/
//! ├── config.toml              # Generator configuration
//! └── templates/               # Default export target for templates
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project layout (relative to the project root, '/' separated)
// =============================================================================

pub const SRCS_DIR: &str = "srcs";
pub const INCS_DIR: &str = "incs";
pub const OBJS_DIR: &str = "objs";
pub const BINS_DIR: &str = "bins";
pub const OTHER_DIR: &str = "other";
pub const DOCS_DIR: &str = "docs";
pub const STARTUP_DIR: &str = "srcs/startup";

/// Directories every project gets, in creation order
pub const LAYOUT_DIRS: [&str; 6] = [SRCS_DIR, INCS_DIR, OBJS_DIR, BINS_DIR, OTHER_DIR, DOCS_DIR];

pub const ROOT_MAKEFILE: &str = "Makefile";
pub const SRCS_MAKEFILE: &str = "srcs/Makefile";
pub const MAIN_C: &str = "srcs/main.c";
pub const DEFINITIONS_H: &str = "incs/definitions.h";
pub const STARTUP_S: &str = "srcs/startup/startup.S";
pub const GITIGNORE: &str = ".gitignore";
pub const README: &str = "README.md";
pub const VSCODE_TASKS: &str = ".vscode/tasks.json";
pub const VSCODE_LAUNCH: &str = ".vscode/launch.json";
pub const VSCODE_CPP_PROPERTIES: &str = ".vscode/c_cpp_properties.json";

/// Project root: `<output_root>/<project_name>`
pub fn project_root(output_root: &Path, project_name: &str) -> PathBuf {
    output_root.join(project_name)
}

/// Join a '/' separated layout path onto `root` one component at a time
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

// =============================================================================
// Generator home (~/.pic32gen/)
// =============================================================================

/// Generator home directory: `~/.pic32gen/`
pub fn generator_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pic32gen")
}

/// Generator configuration: `~/.pic32gen/config.toml`
pub fn config_path() -> PathBuf {
    generator_home().join("config.toml")
}

/// Default template export directory: `~/.pic32gen/templates/`
pub fn templates_dir() -> PathBuf {
    generator_home().join("templates")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_components() {
        let path = resolve(Path::new("/out/Blinky"), STARTUP_S);
        assert_eq!(
            path,
            Path::new("/out/Blinky").join("srcs").join("startup").join("startup.S")
        );
    }

    #[test]
    fn test_project_root() {
        let root = project_root(Path::new("/tmp/out"), "DemoProj");
        assert!(root.ends_with("DemoProj"));
        assert!(root.starts_with("/tmp/out"));
    }

    #[test]
    fn test_config_path_under_home() {
        let path = config_path();
        assert!(path.ends_with(".pic32gen/config.toml"));
    }
}
