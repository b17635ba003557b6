//! 用户管理命令

use std::io::{self, IsTerminal};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::AuthService;

/// 命令行参数优先，否则交互式输入（带确认）
fn resolve_password(password: Option<String>) -> Result<String, CliError> {
    if let Some(pwd) = password {
        return Ok(pwd);
    }

    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or run interactively.".to_string(),
        ));
    }

    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))?;
    let confirm = rpassword::prompt_password("Confirm password: ")
        .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))?;

    if password != confirm {
        return Err(CliError::InputError("Passwords do not match".to_string()));
    }
    Ok(password)
}

pub async fn add_user(
    auth: &AuthService,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = resolve_password(password)?;
    let user = auth.create_user(email, &password).await?;

    println!(
        "{} {} ({})",
        "User created:".green().bold(),
        user.email.cyan(),
        user.id.dimmed()
    );
    Ok(())
}

pub async fn set_password(
    auth: &AuthService,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = resolve_password(password)?;
    auth.set_password(email, &password).await?;

    println!("{} {}", "Password updated for".green(), email.cyan());
    println!(
        "  {}",
        "Existing sessions stay valid until they expire".dimmed()
    );
    Ok(())
}

pub async fn list_users(auth: &AuthService) -> Result<(), CliError> {
    let users = auth.list_users().await?;

    if users.is_empty() {
        println!("{}", "No users. Create one with `qrmatic user add <email>`.".yellow());
        return Ok(());
    }

    println!("{}", "Users:".bold().green());
    for user in &users {
        println!(
            "  {} {}",
            user.email.cyan(),
            format!("(created {})", user.created_at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
        );
    }
    println!("{} {}", "Total:".bold(), users.len());
    Ok(())
}
