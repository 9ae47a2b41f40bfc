//! Configuration CLI command handlers

use crate::cli::commands::{ConfigCommand, ConfigKey};
use crate::core::config::Config;
use crate::error::{Result, RevueError};

/// Handle configuration commands
pub fn handle_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Set { key, value } => handle_set(key, value),
        ConfigCommand::Get { key } => handle_get(key),
        ConfigCommand::Remove { key } => handle_remove(key),
    }
}

/// Handle setting a configuration value
fn handle_set(key: ConfigKey, value: String) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        ConfigKey::Remote => {
            if value.is_empty() {
                return Err(RevueError::InvalidInput(
                    "Remote name cannot be empty".to_string(),
                ));
            }
            config.remote = value.clone();
            println!("Remote set to: {}", value);
        }
        ConfigKey::DeleteRemoteOnFinish => {
            let flag: bool = value.parse().map_err(|_| {
                RevueError::InvalidInput(format!("Expected 'true' or 'false', got '{}'", value))
            })?;
            config.delete_remote_on_finish = flag;
            println!("Delete remote branch on finish: {}", flag);
        }
    }

    config.save()
}

/// Handle getting a configuration value
fn handle_get(key: ConfigKey) -> Result<()> {
    let config = Config::load()?;

    match key {
        ConfigKey::Remote => println!("remote: {}", config.remote),
        ConfigKey::DeleteRemoteOnFinish => {
            println!("delete-remote-on-finish: {}", config.delete_remote_on_finish)
        }
    }
    Ok(())
}

/// Handle resetting a configuration value to its default
fn handle_remove(key: ConfigKey) -> Result<()> {
    let mut config = Config::load()?;
    let defaults = Config::default();

    match key {
        ConfigKey::Remote => {
            config.remote = defaults.remote;
            println!("Remote reset to default: {}", config.remote);
        }
        ConfigKey::DeleteRemoteOnFinish => {
            config.delete_remote_on_finish = defaults.delete_remote_on_finish;
            println!(
                "Delete remote branch on finish reset to default: {}",
                config.delete_remote_on_finish
            );
        }
    }

    config.save()
}
