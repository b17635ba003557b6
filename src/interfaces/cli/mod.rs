//! CLI interface module
//!
//! Account provisioning and config generation. There is no signup page, so
//! this is the only way to create users.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands, UserCommands};
use crate::config::StaticConfig;
use crate::services::AuthService;
use crate::storage::StorageFactory;
use commands::{add_user, config_generate, list_users, set_password};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InputError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::QrmaticError> for CliError {
    fn from(err: crate::errors::QrmaticError) -> Self {
        match err {
            crate::errors::QrmaticError::Validation(msg)
            | crate::errors::QrmaticError::Conflict(msg)
            | crate::errors::QrmaticError::NotFound(msg) => CliError::CommandError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is handled by the caller.
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        // 生成配置文件不需要数据库
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),

        Commands::User { action } => {
            let storage = StorageFactory::create(&config.database)
                .await
                .map_err(|e| CliError::StorageError(e.to_string()))?;
            let auth = AuthService::new(storage);

            match action {
                UserCommands::Add { email, password } => add_user(&auth, &email, password).await,
                UserCommands::Passwd { email, password } => {
                    set_password(&auth, &email, password).await
                }
                UserCommands::List => list_users(&auth).await,
            }
        }

        Commands::Serve => Err(CliError::CommandError(
            "serve is not a CLI command".to_string(),
        )),
    }
}
