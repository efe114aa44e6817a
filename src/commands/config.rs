//! `pic32gen config`

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use pic32gen::{paths, GeneratorConfig};

/// Load `path` if given, otherwise the user configuration
pub fn load(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => GeneratorConfig::load_user().context("Failed to load user config"),
    }
}

pub fn init(force: bool) -> Result<()> {
    let path = paths::config_path();
    if path.exists() && !force {
        println!(
            "   {} {} already exists {}",
            "•".yellow(),
            path.display(),
            "(use --force to replace)".dimmed()
        );
        return Ok(());
    }

    GeneratorConfig::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("   {} Wrote {}", "✓".green().bold(), path.display());
    Ok(())
}

pub fn show(path: Option<&Path>) -> Result<()> {
    let config = load(path)?;
    let text = config.to_toml().context("Failed to serialize config")?;
    print!("{}", text);
    Ok(())
}

pub fn path() {
    println!("{}", paths::config_path().display());
}
