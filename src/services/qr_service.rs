//! QR code management service
//!
//! Creation, listing, editing and deletion of a user's QR codes, plus
//! short-code resolution for the redirect handler.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::QrConfig;
use crate::errors::{QrmaticError, Result};
use crate::storage::{QrCode, QrCodeSummary, QrKind, SeaOrmStorage};
use crate::utils::generate_short_code;
use crate::utils::url_validator::validate_url;

/// 短码冲突时最多尝试次数
pub const MAX_SHORT_CODE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct CreateQrRequest {
    pub kind: QrKind,
    pub target_url: String,
}

/// 二维码实际编码的内容
///
/// 静态码直接编码目标 URL；动态码编码 `{base}/r/{short_code}`。
pub fn encoded_url(qr: &QrCode, public_base_url: &str) -> String {
    match qr.kind {
        QrKind::Static => qr.target_url.clone(),
        QrKind::Dynamic => format!(
            "{}/r/{}",
            public_base_url.trim_end_matches('/'),
            qr.short_code
        ),
    }
}

/// 短码生成函数，参数为短码长度
pub type ShortCodeSource = Box<dyn Fn(usize) -> String + Send + Sync>;

pub struct QrService {
    storage: Arc<SeaOrmStorage>,
    short_code_length: usize,
    public_base_url: String,
    code_source: ShortCodeSource,
}

impl QrService {
    pub fn new(storage: Arc<SeaOrmStorage>, qr_config: &QrConfig, public_base_url: &str) -> Self {
        Self {
            storage,
            short_code_length: qr_config.short_code_length,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            code_source: Box::new(generate_short_code),
        }
    }

    /// 替换短码生成方式（默认 [`generate_short_code`]）
    pub fn with_code_source<F>(mut self, source: F) -> Self
    where
        F: Fn(usize) -> String + Send + Sync + 'static,
    {
        self.code_source = Box::new(source);
        self
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn encoded_url(&self, qr: &QrCode) -> String {
        encoded_url(qr, &self.public_base_url)
    }

    pub async fn create(&self, user_id: &str, req: CreateQrRequest) -> Result<QrCode> {
        let target_url = validate_url(&req.target_url)?;

        for attempt in 1..=MAX_SHORT_CODE_ATTEMPTS {
            let now = Utc::now();
            let qr = QrCode {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                kind: req.kind,
                short_code: (self.code_source)(self.short_code_length),
                target_url: target_url.clone(),
                created_at: now,
                updated_at: now,
            };

            match self.storage.insert_qrcode(&qr).await {
                Ok(()) => return Ok(qr),
                Err(QrmaticError::Conflict(msg)) => {
                    warn!("Short code collision (attempt {}): {}", attempt, msg);
                }
                Err(e) => return Err(e),
            }
        }

        Err(QrmaticError::conflict(format!(
            "Could not allocate a unique short code after {} attempts",
            MAX_SHORT_CODE_ATTEMPTS
        )))
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<QrCodeSummary>> {
        self.storage.list_qrcodes_with_counts(user_id).await
    }

    /// 只返回属于该用户的二维码；他人的记录同样报 NotFound
    pub async fn get(&self, user_id: &str, id: &str) -> Result<QrCode> {
        self.storage
            .find_qrcode_for_user(user_id, id)
            .await?
            .ok_or_else(|| QrmaticError::not_found("QR code not found"))
    }

    pub async fn update_target(&self, user_id: &str, id: &str, target_url: &str) -> Result<QrCode> {
        let existing = self.get(user_id, id).await?;
        if !existing.kind.is_dynamic() {
            return Err(QrmaticError::validation("Only dynamic QR codes can be edited"));
        }

        let target_url = validate_url(target_url)?;
        let updated = self
            .storage
            .update_qrcode_target(user_id, id, &target_url, Utc::now())
            .await?
            .ok_or_else(|| QrmaticError::not_found("QR code not found"))?;

        info!("QR code {} retargeted", updated.short_code);
        Ok(updated)
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
        if self.storage.delete_qrcode(user_id, id).await? {
            Ok(())
        } else {
            Err(QrmaticError::not_found("QR code not found"))
        }
    }

    /// 跳转解析：只有动态码可跳转，静态码与不存在的短码都返回 None
    pub async fn resolve_dynamic(&self, short_code: &str) -> Result<Option<QrCode>> {
        let found = self.storage.find_qrcode_by_short_code(short_code).await?;
        Ok(found.filter(|qr| qr.kind.is_dynamic()))
    }
}
