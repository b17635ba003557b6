use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// 二维码类型：静态码直接编码目标 URL，动态码编码跳转地址并记录扫码
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QrKind {
    Static,
    Dynamic,
}

impl QrKind {
    pub fn is_dynamic(self) -> bool {
        matches!(self, QrKind::Dynamic)
    }

    /// 页面展示用的首字母大写名称
    pub fn label(self) -> &'static str {
        match self {
            QrKind::Static => "Static",
            QrKind::Dynamic => "Dynamic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
    pub id: String,
    pub user_id: String,
    pub kind: QrKind,
    pub short_code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 仪表盘列表行：二维码及其累计扫码数
#[derive(Debug, Clone, Serialize)]
pub struct QrCodeSummary {
    #[serde(flatten)]
    pub qr: QrCode,
    pub scan_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanLog {
    pub id: i64,
    pub qrcode_id: String,
    pub scanned_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}

/// 待写入的扫码记录（id 由数据库生成）
#[derive(Debug, Clone)]
pub struct NewScan {
    pub qrcode_id: String,
    pub scanned_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
