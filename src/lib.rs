//! Project generator for PIC32MZ firmware built with Microchip XC32
//!
//! [`scaffold`] creates the directory layout and writes the Makefiles,
//! starter sources and optional startup assembly; [`templates`] provides the
//! template text, either embedded or read from a directory.

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod scaffold;
pub mod templates;
pub mod vscode;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use error::{GenerationError, GenerationResult};
pub use scaffold::{GenerationReport, GenerationRequest, Scaffolder};
