//! Print the effective configuration.

use anyhow::Result;
use colored::Colorize;

use crate::config::{Config, CONFIG_FILE};

pub fn run() -> Result<()> {
    let cwd = std::env::current_dir()?;
    match crate::config::find_config_file(&cwd) {
        Some(path) => println!("{} {}", "# Loaded from".dimmed(), path.display()),
        None => println!("{} {}", "# No file found, defaults for".dimmed(), CONFIG_FILE),
    }
    let config = Config::load()?;
    print!("{}", config.to_toml()?);
    Ok(())
}
