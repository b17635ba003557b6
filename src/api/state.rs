//! 应用共享状态
//!
//! 所有 handler 通过 `web::Data<AppState>` 取得服务实例。

use std::sync::Arc;

use crate::api::jwt::JwtService;
use crate::config::{SameSitePolicy, StaticConfig};
use crate::services::{AnalyticsService, AuthService, QrService, ScanRecorder};
use crate::storage::SeaOrmStorage;

/// Session cookie attributes taken from `[auth]`.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub same_site: SameSitePolicy,
    pub max_age_minutes: i64,
}

/// QR image rendering parameters taken from `[qr]`.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub size: u32,
    pub margin: u32,
}

pub struct AppState {
    pub storage: Arc<SeaOrmStorage>,
    pub auth: AuthService,
    pub qr: QrService,
    pub analytics: AnalyticsService,
    pub scans: ScanRecorder,
    pub jwt: JwtService,
    pub cookies: CookieSettings,
    pub render: RenderSettings,
}

impl AppState {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &StaticConfig) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&storage)),
            qr: QrService::new(
                Arc::clone(&storage),
                &config.qr,
                config.server.base_url(),
            ),
            analytics: AnalyticsService::new(Arc::clone(&storage), &config.analytics),
            scans: ScanRecorder::new(Arc::clone(&storage)),
            jwt: JwtService::from_config(&config.auth),
            cookies: CookieSettings {
                secure: config.auth.cookie_secure,
                same_site: config.auth.cookie_same_site,
                max_age_minutes: config.auth.session_minutes as i64,
            },
            render: RenderSettings {
                size: config.qr.image_size,
                margin: config.qr.margin,
            },
            storage,
        }
    }
}
