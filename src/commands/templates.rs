//! `pic32gen templates`

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use pic32gen::templates::{export_embedded, TemplateId};

pub fn export(dir: &Path, force: bool) -> Result<()> {
    let report = export_embedded(dir, force)
        .with_context(|| format!("Failed to export templates to {}", dir.display()))?;

    for path in &report.written {
        println!("   {} Wrote {}", "✓".green().bold(), path.display());
    }
    for path in &report.skipped {
        println!(
            "   {} Kept {} {}",
            "•".yellow(),
            path.display(),
            "(use --force to replace)".dimmed()
        );
    }

    println!();
    println!(
        "Use them with: pic32gen generate <name> --templates {}",
        dir.display()
    );
    Ok(())
}

pub fn list() {
    println!("{}", "Templates".bold());
    for id in TemplateId::ALL {
        let kind = if id.is_verbatim() { "verbatim" } else { "rendered" };
        println!("  {:<16} {:<22} {}", id.name(), id.file_name(), kind.dimmed());
    }
}
