use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use pic32gen::scaffold::WritePolicy;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Project generator for PIC32MZ / XC32 firmware", long_about = None)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new project skeleton
    Generate {
        /// Project name, used as directory name and make MODULE
        project_name: String,

        /// Target device part number (defaults to the configured device)
        #[arg(short, long)]
        device: Option<String>,

        /// Directory the project is created in
        #[arg(short, long, default_value = ".")]
        output: String,

        /// Add startup assembly for the MikroC bootloader
        #[arg(long)]
        mikroc: bool,

        /// Read templates from this directory instead of the embedded set
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,

        /// What to do with an existing README.md
        #[arg(long, value_enum)]
        readme_policy: Option<PolicyArg>,

        /// Do not generate incs/definitions.h
        #[arg(long)]
        no_definitions: bool,

        /// Also generate .vscode tasks, launch and IntelliSense files
        #[arg(long)]
        vscode: bool,

        /// Configuration file (defaults to ~/.pic32gen/config.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Inspect or export the project templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommands,
    },

    /// Manage the generator configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum TemplatesCommands {
    /// Write the embedded templates into a directory for customization
    Export {
        /// Target directory
        dir: PathBuf,

        /// Replace template files that already exist
        #[arg(long)]
        force: bool,
    },

    /// List template names and file names
    List,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default configuration file
    Init {
        /// Replace an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show {
        /// Configuration file (defaults to ~/.pic32gen/config.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the configuration file path
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    SkipIfExists,
    AlwaysOverwrite,
}

impl From<PolicyArg> for WritePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::SkipIfExists => WritePolicy::SkipIfExists,
            PolicyArg::AlwaysOverwrite => WritePolicy::AlwaysOverwrite,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pic32gen::logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            project_name,
            device,
            output,
            mikroc,
            templates,
            readme_policy,
            no_definitions,
            vscode,
            config,
        } => {
            commands::generate::execute(commands::generate::GenerateOptions {
                project_name,
                device,
                output,
                mikroc,
                templates,
                readme_policy: readme_policy.map(WritePolicy::from),
                no_definitions,
                vscode,
                config,
            })?;
        }
        Commands::Templates { command } => match command {
            TemplatesCommands::Export { dir, force } => {
                commands::templates::export(&dir, force)?;
            }
            TemplatesCommands::List => {
                commands::templates::list();
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => {
                commands::config::init(force)?;
            }
            ConfigCommands::Show { config } => {
                commands::config::show(config.as_deref())?;
            }
            ConfigCommands::Path => {
                commands::config::path();
            }
        },
    }

    Ok(())
}
