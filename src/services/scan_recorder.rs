use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::storage::{NewScan, SeaOrmStorage};

/// Fire-and-forget scan logging.
///
/// Each scan is written on its own spawned task with a single attempt. The
/// redirect response never waits for it; a failed insert is only logged.
#[derive(Clone)]
pub struct ScanRecorder {
    storage: Arc<SeaOrmStorage>,
}

impl ScanRecorder {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 异步记录一次扫码，返回的句柄只供测试等待
    pub fn record(&self, qrcode_id: &str, ip_address: String, user_agent: String) -> JoinHandle<()> {
        let storage = Arc::clone(&self.storage);
        let scan = NewScan {
            qrcode_id: qrcode_id.to_string(),
            scanned_at: Utc::now(),
            ip_address,
            user_agent,
        };

        tokio::spawn(async move {
            match storage.insert_scan(&scan).await {
                Ok(()) => debug!("Scan recorded for {}", scan.qrcode_id),
                Err(e) => error!("Failed to record scan for {}: {}", scan.qrcode_id, e),
            }
        })
    }
}
