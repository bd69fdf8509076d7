use anyhow::{Context, Result};
use std::process::Command;

use super::success;
use crate::config::{Config, TOKEN_ENV};

pub fn show_config(config: Config) -> Result<()> {
    let path = config.path()?;

    // Never echo the bearer token
    let overridden = config.is_token_overridden();
    let mut shown = config;
    if !shown.auth.token.is_empty() {
        shown.auth.token = "********".to_string();
    }
    let config_str = toml::to_string_pretty(&shown)?;

    println!("Current Configuration");
    println!("────────────────────────────────");
    println!("File: {}", path.display());
    if overridden {
        println!("Token: taken from {}", TOKEN_ENV);
    }
    println!();
    println!("{}", config_str);

    Ok(())
}

pub fn edit_config(config: Config) -> Result<()> {
    let config_file = config.path()?;

    // Ensure config file exists
    if !config_file.exists() {
        config.save()?;
    }

    // Open in default editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    let status = Command::new(&editor)
        .arg(&config_file)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;
    if !status.success() {
        anyhow::bail!("Editor exited with {}", status);
    }

    // Reject edits that no longer parse
    Config::load_from(&config_file)?;

    success("Configuration saved!");

    Ok(())
}

pub fn init_config(config: Config, force: bool) -> Result<()> {
    let config_file = config.path()?;

    if config_file.exists() && !force {
        println!(
            "Configuration file already exists at: {}",
            config_file.display()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let fresh = Config::default().with_path(&config_file);
    fresh.save()?;

    success(format!(
        "Configuration initialized at: {}",
        config_file.display()
    ));
    println!();
    println!("You can edit it with: fittrack config edit");

    Ok(())
}
