//! Local account authentication
//!
//! Accounts are provisioned from the CLI; the web surface only logs in.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{QrmaticError, Result};
use crate::storage::{SeaOrmStorage, User};
use crate::utils::password::{MIN_PASSWORD_LENGTH, hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// 邮箱统一去空白并转小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService {
    storage: Arc<SeaOrmStorage>,
}

impl AuthService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 校验邮箱和密码
    ///
    /// 邮箱不存在与密码错误返回同一条消息。
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(QrmaticError::unauthorized(INVALID_CREDENTIALS));
        }

        let Some(user) = self.storage.find_user_by_email(&email).await? else {
            warn!("Login failed: unknown account");
            return Err(QrmaticError::unauthorized(INVALID_CREDENTIALS));
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {
                info!("User logged in: {}", user.email);
                Ok(user)
            }
            Ok(false) => {
                warn!("Login failed: wrong password for {}", user.email);
                Err(QrmaticError::unauthorized(INVALID_CREDENTIALS))
            }
            Err(e) => {
                warn!("Stored password hash for {} is unreadable: {}", user.email, e);
                Err(QrmaticError::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }

    pub async fn create_user(&self, email: &str, password: &str) -> Result<User> {
        let email = validate_email(email)?;
        validate_password(password)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.storage.insert_user(&user).await?;
        Ok(user)
    }

    pub async fn set_password(&self, email: &str, password: &str) -> Result<()> {
        let email = validate_email(email)?;
        validate_password(password)?;

        let hash = hash_password(password)?;
        if !self.storage.update_password_hash(&email, &hash).await? {
            return Err(QrmaticError::not_found(format!("No user with email {}", email)));
        }
        info!("Password updated for {}", email);
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.storage.list_users().await
    }
}

fn validate_email(email: &str) -> Result<String> {
    let email = normalize_email(email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(QrmaticError::validation(format!("Invalid email address: {}", email))),
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(QrmaticError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
