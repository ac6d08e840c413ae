//! Config command - view and edit `config.ini`.

use clap::Subcommand;
use console::style;
use woai_installer::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print a value
    Get {
        /// Key as section.key (e.g. install.root)
        key: String,
    },

    /// Store a value; an empty value restores the default
    Set {
        /// Key as section.key (e.g. merge.collisions)
        key: String,

        /// New value
        value: String,
    },

    /// List every setting
    List,

    /// Print the config file location
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();

    match command {
        ConfigCommands::Get { key } => {
            let key: ConfigKey = key.parse()?;
            let config = ConfigFile::load_from(&path)?;
            println!("{}", shown(&key.get(&config)));
        }
        ConfigCommands::Set { key, value } => {
            let key: ConfigKey = key.parse()?;
            let mut config = ConfigFile::load_from(&path)?;
            key.set(&mut config, &value)?;
            config.save_to(&path)?;
            println!("{} = {}", style(key).bold(), shown(&key.get(&config)));
            println!("Saved to {}", path.display());
        }
        ConfigCommands::List => {
            let config = ConfigFile::load_from(&path)?;
            println!("{}", style(format!("# {}", path.display())).dim());
            for line in list_lines(&config) {
                println!("{}", line);
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn shown(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}

/// `section.key = value`, one line per setting, with aligned names.
fn list_lines(config: &ConfigFile) -> Vec<String> {
    let width = ConfigKey::all()
        .iter()
        .map(|key| key.name().len())
        .max()
        .unwrap_or(0);

    ConfigKey::all()
        .iter()
        .map(|key| {
            format!(
                "{:<width$} = {}",
                key.name(),
                shown(&key.get(config)),
                width = width
            )
        })
        .collect()
}
