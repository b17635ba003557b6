use std::str::FromStr;

use sea_orm::ActiveValue::{NotSet, Set};

use crate::errors::{QrmaticError, Result};
use crate::storage::{NewScan, QrCode, QrKind, ScanLog, User};
use migration::entities::{qr_code, scan_log, user};

/// 将 Sea-ORM Model 转换为 QrCode
///
/// `type` 列存的是小写字符串，未知取值视为数据损坏。
pub fn model_to_qrcode(model: qr_code::Model) -> Result<QrCode> {
    let kind = QrKind::from_str(&model.kind).map_err(|_| {
        QrmaticError::database_operation(format!(
            "Unknown QR code type '{}' for {}",
            model.kind, model.id
        ))
    })?;

    Ok(QrCode {
        id: model.id,
        user_id: model.user_id,
        kind,
        short_code: model.short_code,
        target_url: model.target_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// 将 QrCode 转换为 ActiveModel
///
/// 更新时只写目标 URL 与 updated_at，其余列（包括主键）保持 NotSet，
/// 由调用方通过过滤条件定位行。
pub fn qrcode_to_active_model(qr: &QrCode, is_new: bool) -> qr_code::ActiveModel {
    if is_new {
        qr_code::ActiveModel {
            id: Set(qr.id.clone()),
            user_id: Set(qr.user_id.clone()),
            kind: Set(qr.kind.to_string()),
            short_code: Set(qr.short_code.clone()),
            target_url: Set(qr.target_url.clone()),
            created_at: Set(qr.created_at),
            updated_at: Set(qr.updated_at),
        }
    } else {
        qr_code::ActiveModel {
            id: NotSet,
            user_id: NotSet,
            kind: NotSet,
            short_code: NotSet,
            target_url: Set(qr.target_url.clone()),
            created_at: NotSet,
            updated_at: Set(qr.updated_at),
        }
    }
}

pub fn model_to_scan_log(model: scan_log::Model) -> ScanLog {
    ScanLog {
        id: model.id,
        qrcode_id: model.qrcode_id,
        scanned_at: model.scanned_at,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
    }
}

pub fn new_scan_to_active_model(scan: &NewScan) -> scan_log::ActiveModel {
    scan_log::ActiveModel {
        id: NotSet,
        qrcode_id: Set(scan.qrcode_id.clone()),
        scanned_at: Set(scan.scanned_at),
        ip_address: Set(scan.ip_address.clone()),
        user_agent: Set(scan.user_agent.clone()),
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

pub fn user_to_active_model(user: &User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(user.id.clone()),
        email: Set(user.email.clone()),
        password_hash: Set(user.password_hash.clone()),
        created_at: Set(user.created_at),
    }
}
