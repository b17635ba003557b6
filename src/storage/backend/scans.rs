//! Scan log operations. Append-only: no update path.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use super::converters::{model_to_scan_log, new_scan_to_active_model};
use super::{SeaOrmStorage, retry};
use crate::errors::{QrmaticError, Result};
use crate::storage::{NewScan, ScanLog};

use migration::entities::scan_log;

impl SeaOrmStorage {
    /// 写入一条扫码记录（单次尝试，不重试）
    pub async fn insert_scan(&self, scan: &NewScan) -> Result<()> {
        scan_log::Entity::insert(new_scan_to_active_model(scan))
            .exec(&self.db)
            .await
            .map_err(|e| QrmaticError::database_operation(format!("Failed to record scan: {}", e)))?;
        Ok(())
    }

    /// `since` 之后的扫码记录，按时间升序
    pub async fn scans_since(&self, qrcode_id: &str, since: DateTime<Utc>) -> Result<Vec<ScanLog>> {
        let db = &self.db;

        let models = retry::with_retry(
            &format!("scans_since({})", qrcode_id),
            self.retry_config,
            || async {
                scan_log::Entity::find()
                    .filter(scan_log::Column::QrcodeId.eq(qrcode_id))
                    .filter(scan_log::Column::ScannedAt.gte(since))
                    .order_by_asc(scan_log::Column::ScannedAt)
                    .order_by_asc(scan_log::Column::Id)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to load scans: {}", e)))?;

        Ok(models.into_iter().map(model_to_scan_log).collect())
    }

    pub async fn count_scans(&self, qrcode_id: &str) -> Result<u64> {
        let db = &self.db;

        retry::with_retry(&format!("count_scans({})", qrcode_id), self.retry_config, || async {
            scan_log::Entity::find()
                .filter(scan_log::Column::QrcodeId.eq(qrcode_id))
                .count(db)
                .await
        })
        .await
        .map_err(|e| QrmaticError::database_operation(format!("Failed to count scans: {}", e)))
    }
}
