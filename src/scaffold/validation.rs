//! Project name checks
//!
//! The name becomes a directory below the output root and is substituted
//! into Makefiles, so it must be one plain path segment that make reads back
//! unchanged.

use crate::error::{GenerationError, GenerationResult};

/// Characters make treats specially in `MODULE := <name>` or in targets
const MAKE_METACHARACTERS: &[char] = &['#', '$', '%', '=', ';', '"', '\'', '`'];

/// Characters Windows does not allow in file names
const WINDOWS_RESERVED: &[char] = &['<', '>', '|', '?', '*'];

/// Accept `name` only if it is a single, safe path segment.
///
/// Rejects empty names, path separators, `.` and `..`, drive prefixes,
/// whitespace, control characters, make metacharacters and characters
/// Windows reserves.
pub fn validate_project_name(name: &str) -> GenerationResult<&str> {
    if name.trim().is_empty() {
        return Err(GenerationError::invalid_name(name, "name is empty"));
    }

    if name.contains('\0') || name.chars().any(char::is_control) {
        return Err(GenerationError::invalid_name(
            name,
            "name contains control characters",
        ));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(GenerationError::invalid_name(name, "name contains whitespace"));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(GenerationError::invalid_name(
            name,
            "name must be a single path segment",
        ));
    }

    if name == "." || name == ".." {
        return Err(GenerationError::invalid_name(
            name,
            "name refers to a relative directory",
        ));
    }

    if name.contains(':') {
        return Err(GenerationError::invalid_name(name, "name contains ':'"));
    }

    if name.contains(MAKE_METACHARACTERS) {
        return Err(GenerationError::invalid_name(
            name,
            "name contains a character make treats specially",
        ));
    }

    if name.contains(WINDOWS_RESERVED) {
        return Err(GenerationError::invalid_name(
            name,
            "name contains a character not allowed in Windows file names",
        ));
    }

    Ok(name)
}
