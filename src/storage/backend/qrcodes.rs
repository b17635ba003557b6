//! QR code table operations
//!
//! Every read, update and delete that takes a `user_id` filters on it;
//! a row owned by someone else is indistinguishable from a missing row.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use tracing::{debug, info};

use super::converters::{model_to_qrcode, qrcode_to_active_model};
use super::{SeaOrmStorage, is_unique_violation, retry};
use crate::errors::{QrmaticError, Result};
use crate::storage::{QrCode, QrCodeSummary};

use migration::entities::{qr_code, scan_log};

impl SeaOrmStorage {
    /// 插入新二维码；短码冲突返回 `Conflict`，由调用方重新生成
    pub async fn insert_qrcode(&self, qr: &QrCode) -> Result<()> {
        let db = &self.db;
        let active = qrcode_to_active_model(qr, true);

        let result = retry::with_retry(
            &format!("insert_qrcode({})", qr.short_code),
            self.retry_config,
            || {
                let active = active.clone();
                async move {
                    qr_code::Entity::insert(active)
                        .exec_without_returning(db)
                        .await
                }
            },
        )
        .await;

        match result {
            Ok(_) => {
                info!("QR code created: {} ({})", qr.short_code, qr.kind);
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Err(QrmaticError::conflict(format!(
                "Short code already exists: {}",
                qr.short_code
            ))),
            Err(e) => Err(QrmaticError::database_operation(format!(
                "Failed to create QR code: {}",
                e
            ))),
        }
    }

    pub async fn find_qrcode_for_user(&self, user_id: &str, id: &str) -> Result<Option<QrCode>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("find_qrcode({})", id), self.retry_config, || async {
            qr_code::Entity::find_by_id(id.to_string())
                .filter(qr_code::Column::UserId.eq(user_id))
                .one(db)
                .await
        })
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to load QR code: {}", e)))?;

        model.map(model_to_qrcode).transpose()
    }

    /// 跳转时按短码查找，不区分所有者
    pub async fn find_qrcode_by_short_code(&self, short_code: &str) -> Result<Option<QrCode>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("find_by_short_code({})", short_code),
            self.retry_config,
            || async {
                qr_code::Entity::find()
                    .filter(qr_code::Column::ShortCode.eq(short_code))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to look up short code: {}", e)))?;

        model.map(model_to_qrcode).transpose()
    }

    /// 用户的全部二维码（新的在前）及各自的累计扫码数
    pub async fn list_qrcodes_with_counts(&self, user_id: &str) -> Result<Vec<QrCodeSummary>> {
        let db = &self.db;

        let models = retry::with_retry("list_qrcodes", self.retry_config, || async {
            qr_code::Entity::find()
                .filter(qr_code::Column::UserId.eq(user_id))
                .order_by_desc(qr_code::Column::CreatedAt)
                .all(db)
                .await
        })
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to list QR codes: {}", e)))?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
        let counts: HashMap<String, i64> =
            retry::with_retry("count_scans_by_qrcode", self.retry_config, || async {
                scan_log::Entity::find()
                    .select_only()
                    .column(scan_log::Column::QrcodeId)
                    .column_as(scan_log::Column::Id.count(), "count")
                    .filter(scan_log::Column::QrcodeId.is_in(ids.clone()))
                    .group_by(scan_log::Column::QrcodeId)
                    .into_tuple::<(String, i64)>()
                    .all(db)
                    .await
            })
            .await
            .map_err(|e| QrmaticError::database_operation(format!("Failed to count scans: {}", e)))?
            .into_iter()
            .collect();

        models
            .into_iter()
            .map(|model| {
                let scan_count = std::cmp::Ord::max(counts.get(&model.id).copied().unwrap_or(0), 0) as u64;
                Ok(QrCodeSummary {
                    qr: model_to_qrcode(model)?,
                    scan_count,
                })
            })
            .collect()
    }

    /// 更新目标 URL，返回更新后的记录；不属于该用户时返回 None
    pub async fn update_qrcode_target(
        &self,
        user_id: &str,
        id: &str,
        target_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<QrCode>> {
        let db = &self.db;
        let Some(mut qr) = self.find_qrcode_for_user(user_id, id).await? else {
            return Ok(None);
        };
        qr.target_url = target_url.to_string();
        qr.updated_at = now;
        let active = qrcode_to_active_model(&qr, false);

        let result = retry::with_retry(&format!("update_qrcode({})", id), self.retry_config, || {
            let active = active.clone();
            async move {
                qr_code::Entity::update_many()
                    .set(active)
                    .filter(qr_code::Column::Id.eq(id))
                    .filter(qr_code::Column::UserId.eq(user_id))
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to update QR code: {}", e)))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        debug!("QR code {} now points to {}", qr.short_code, qr.target_url);
        Ok(Some(qr))
    }

    /// 删除二维码及其扫码日志（同一事务）；返回是否删除了记录
    pub async fn delete_qrcode(&self, user_id: &str, id: &str) -> Result<bool> {
        let db = &self.db;

        let deleted = retry::with_retry(&format!("delete_qrcode({})", id), self.retry_config, || {
            delete_qrcode_txn(db, user_id, id)
        })
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to delete QR code: {}", e)))?;

        if deleted {
            info!("QR code deleted: {}", id);
        }
        Ok(deleted)
    }
}

async fn delete_qrcode_txn(
    db: &DatabaseConnection,
    user_id: &str,
    id: &str,
) -> std::result::Result<bool, DbErr> {
    let txn = db.begin().await?;

    let owned = qr_code::Entity::find_by_id(id.to_string())
        .filter(qr_code::Column::UserId.eq(user_id))
        .one(&txn)
        .await?;
    if owned.is_none() {
        txn.rollback().await?;
        return Ok(false);
    }

    scan_log::Entity::delete_many()
        .filter(scan_log::Column::QrcodeId.eq(id))
        .exec(&txn)
        .await?;
    qr_code::Entity::delete_many()
        .filter(qr_code::Column::Id.eq(id))
        .filter(qr_code::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(true)
}
