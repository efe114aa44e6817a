//! `pic32gen generate`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::*;

use pic32gen::config::TemplateStrategy;
use pic32gen::scaffold::{Action, GenerationReport, GenerationRequest, Scaffolder, WritePolicy};
use pic32gen::GeneratorConfig;

/// Command-line values; `None`/`false` leaves the configured value alone
pub struct GenerateOptions {
    pub project_name: String,
    pub device: Option<String>,
    pub output: String,
    pub mikroc: bool,
    pub templates: Option<PathBuf>,
    pub readme_policy: Option<WritePolicy>,
    pub no_definitions: bool,
    pub vscode: bool,
    pub config: Option<PathBuf>,
}

pub fn execute(options: GenerateOptions) -> Result<()> {
    let mut config = super::config::load(options.config.as_deref())?;
    apply_overrides(&mut config, &options);

    let output_root = resolve_output(&options.output)?;
    let request = GenerationRequest::new(&options.project_name)
        .device(&config.defaults.device)
        .output_root(&output_root)
        .include_startup(config.defaults.include_startup);

    let scaffolder = Scaffolder::from_config(&config);
    print_header(&request, &scaffolder);

    // Partial progress is printed before a failure is returned
    let mut report = GenerationReport::new(request.project_root(), request.include_startup);
    let outcome = scaffolder.generate_into(&request, &mut report);
    print_actions(&report);
    outcome.with_context(|| format!("Failed to generate project '{}'", request.project_name))?;

    print_banner(&report, &request.project_name);
    Ok(())
}

/// Flags win over the configuration file
fn apply_overrides(config: &mut GeneratorConfig, options: &GenerateOptions) {
    if let Some(device) = &options.device {
        config.defaults.device = device.clone();
    }
    if options.mikroc {
        config.defaults.include_startup = true;
    }
    if let Some(dir) = &options.templates {
        config.templates.source = TemplateStrategy::Directory;
        config.templates.dir = Some(dir.clone());
    }
    if let Some(policy) = options.readme_policy {
        config.output.readme_policy = policy;
    }
    if options.no_definitions {
        config.output.definitions_header = false;
    }
    if options.vscode {
        config.output.vscode = true;
    }
}

/// Expand `~` and make the output root absolute
fn resolve_output(output: &str) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(output).as_ref());
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd.join(expanded))
}

fn print_header(request: &GenerationRequest, scaffolder: &Scaffolder) {
    println!(
        "{} {}",
        "Generating PIC32MZ project:".bold(),
        request.project_name.cyan().bold()
    );
    println!("Target device: {}", request.device);
    println!("Output directory: {}", request.output_root.display());
    if request.include_startup {
        println!("MikroC support: {}", "ENABLED".green());
    }
    println!("Templates: {}", scaffolder.source().describe());
    println!("{}", "-".repeat(50));
}

fn print_actions(report: &GenerationReport) {
    for action in &report.actions {
        let relative = display_path(report, action.path());
        match action {
            Action::CreatedDir(_) => {
                println!("   {} Created directory {}", "✓".green().bold(), relative)
            }
            Action::ExistingDir(_) => {}
            Action::Created(_) => println!("   {} Created {}", "✓".green().bold(), relative),
            Action::Overwrote(_) => println!("   {} Updated {}", "✓".green().bold(), relative),
            Action::Skipped(_) => println!(
                "   {} Skipped {} {}",
                "•".yellow(),
                relative,
                "(already exists)".dimmed()
            ),
        }
    }
}

fn display_path(report: &GenerationReport, path: &Path) -> String {
    let relative = report.relative(path);
    if relative.as_os_str().is_empty() {
        path.display().to_string()
    } else {
        relative.display().to_string()
    }
}

fn print_banner(report: &GenerationReport, project_name: &str) {
    println!("{}", "-".repeat(50));
    println!(
        "{}",
        format!("✅ Project '{}' generated successfully!", project_name)
            .green()
            .bold()
    );
    println!("📁 Location: {}", report.project_root.display());
    println!();
    println!("{}", "Next steps:".bold());
    println!("  cd {}", project_name);
    println!("  make build_dir");
    println!("  make");
    if report.include_startup {
        println!("  make flash");
        println!();
        println!("MikroC startup files included for bootloader compatibility! 🚀");
    } else {
        println!();
        println!("The project is ready for development! 🚀");
    }
}
