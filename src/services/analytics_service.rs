use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::analytics::{AnalyticsReport, build_report};
use crate::config::AnalyticsConfig;
use crate::errors::Result;
use crate::storage::{QrCode, SeaOrmStorage};

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
    window_days: u32,
    recent_limit: usize,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &AnalyticsConfig) -> Self {
        Self {
            storage,
            window_days: config.window_days,
            recent_limit: config.recent_scans,
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// 以 `now` 为基准统计窗口内的扫码
    ///
    /// 调用方负责所有权校验，这里只按 qrcode_id 取数。
    pub async fn report_for(&self, qr: &QrCode, now: DateTime<Utc>) -> Result<AnalyticsReport> {
        let since = now - Duration::days(i64::from(self.window_days));
        let scans = self.storage.scans_since(&qr.id, since).await?;
        debug!(
            "Building analytics for {} from {} scans",
            qr.short_code,
            scans.len()
        );
        Ok(build_report(&scans, now, self.window_days, self.recent_limit))
    }
}
