//! WOAI Installer CLI
//!
//! Merges extracted WOAI traffic packages into a Prepar3D-ready `Output` tree.

mod commands;
mod error;
mod interaction;
mod logging;
mod ui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use console::style;
use woai_installer::config::ConfigFile;

use commands::config::ConfigCommands;
use commands::install::InstallArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "woai-installer", version = woai_installer::VERSION, about)]
struct Cli {
    /// Mirror debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge every extracted package into the output folder
    Install {
        /// Install root containing Source/ and Output/ (default: install.root, then the working directory)
        root: Option<PathBuf>,

        /// Answer yes to folder creation and overwrite questions
        #[arg(short, long)]
        yes: bool,

        /// Abort when two packages supply the same model, texture or scenery file
        #[arg(long)]
        strict: bool,
    },

    /// List extracted packages and their contents
    Scan {
        /// Install root
        root: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the folder layout for an install root
    Paths {
        /// Install root
        root: Option<PathBuf>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match ConfigFile::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("warning:").yellow(), e);
            ConfigFile::default()
        }
    };

    let guard = match logging::init(&config.logging, cli.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} {}", style("warning:").yellow(), e);
            None
        }
    };

    let code = match dispatch(cli.command, &config) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{} {}", style("Error:").red().bold(), e);
            e.exit_code()
        }
    };

    // Flush the log file before exiting.
    drop(guard);
    process::exit(code);
}

fn dispatch(command: Commands, config: &ConfigFile) -> Result<(), CliError> {
    match command {
        Commands::Install { root, yes, strict } => {
            commands::install::run(InstallArgs { root, yes, strict }, config)
        }
        Commands::Scan { root, json } => commands::scan::run(root, json, config),
        Commands::Paths { root } => commands::paths::run(root, config),
        Commands::Config { command } => commands::config::run(command),
    }
}
