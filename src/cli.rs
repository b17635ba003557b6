//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// QRMatic - QR code generator with dynamic redirects and scan analytics
#[derive(Parser, Debug)]
#[command(name = "qrmatic")]
#[command(version)]
#[command(about = "QR code generator with dynamic redirects and scan analytics", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create an account
    Add {
        email: String,

        /// Password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,
    },

    /// Change an account's password
    Passwd {
        email: String,

        /// New password (if not provided, will prompt interactively)
        #[arg(long)]
        password: Option<String>,
    },

    /// List accounts
    List,
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite without asking
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["qrmatic"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, "config.toml");
    }

    #[test]
    fn test_user_add_with_config() {
        let cli = Cli::try_parse_from([
            "qrmatic",
            "user",
            "add",
            "me@example.com",
            "--password",
            "hunter22!",
            "-c",
            "/etc/qrmatic.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, "/etc/qrmatic.toml");
        match cli.command {
            Some(Commands::User {
                action: UserCommands::Add { email, password },
            }) => {
                assert_eq!(email, "me@example.com");
                assert_eq!(password.as_deref(), Some("hunter22!"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_generate_path() {
        let cli = Cli::try_parse_from(["qrmatic", "config", "generate", "out.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate { output_path: Some(ref p), force: false }
            }) if p == "out.toml"
        ));
    }
}
