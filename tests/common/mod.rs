//! 集成测试公共环境
//!
//! 每个测试独立的临时 SQLite 数据库，避免测试之间互相影响。

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::web;
use chrono::{DateTime, Utc};
use tempfile::TempDir;

use qrmatic::api::AppState;
use qrmatic::api::constants::SESSION_COOKIE_NAME;
use qrmatic::config::StaticConfig;
use qrmatic::services::CreateQrRequest;
use qrmatic::storage::{NewScan, QrCode, QrKind, SeaOrmStorage, StorageFactory, User};

pub const PUBLIC_BASE_URL: &str = "https://qr.test";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub struct TestEnv {
    _dir: TempDir,
    pub config: StaticConfig,
    pub storage: Arc<SeaOrmStorage>,
    pub state: web::Data<AppState>,
}

impl TestEnv {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("qrmatic_test.db");

        let mut config = StaticConfig::default();
        config.database.database_url = format!("sqlite://{}?mode=rwc", db_path.display());
        config.server.public_base_url = PUBLIC_BASE_URL.to_string();
        config.auth.jwt_secret = "integration-test-secret-key-32b!".to_string();
        config.qr.image_size = 128;

        let storage = StorageFactory::create(&config.database)
            .await
            .expect("Failed to create storage");
        let state = web::Data::new(AppState::new(Arc::clone(&storage), &config));

        Self {
            _dir: dir,
            config,
            storage,
            state,
        }
    }

    pub async fn create_user(&self, email: &str) -> User {
        self.state
            .auth
            .create_user(email, TEST_PASSWORD)
            .await
            .expect("Failed to create user")
    }

    pub fn session_cookie(&self, user: &User) -> Cookie<'static> {
        let token = self
            .state
            .jwt
            .generate_session_token(user)
            .expect("Failed to sign token");
        Cookie::new(SESSION_COOKIE_NAME, token)
    }

    pub async fn create_qr(&self, user: &User, kind: QrKind, target_url: &str) -> QrCode {
        self.state
            .qr
            .create(
                &user.id,
                CreateQrRequest {
                    kind,
                    target_url: target_url.to_string(),
                },
            )
            .await
            .expect("Failed to create QR code")
    }

    pub async fn insert_scan(&self, qr: &QrCode, at: DateTime<Utc>, user_agent: &str) {
        self.storage
            .insert_scan(&NewScan {
                qrcode_id: qr.id.clone(),
                scanned_at: at,
                ip_address: "203.0.113.7".to_string(),
                user_agent: user_agent.to_string(),
            })
            .await
            .expect("Failed to insert scan");
    }

    /// 扫码记录是异步写入的，轮询等待（最多 2 秒）
    pub async fn wait_for_scans(&self, qr: &QrCode, expected: u64) -> u64 {
        let mut count = 0;
        for _ in 0..20 {
            count = self.storage.count_scans(&qr.id).await.expect("count_scans failed");
            if count >= expected {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        count
    }
}

/// 构建与生产一致的 App（SessionGuard + 全部路由）
macro_rules! init_app {
    ($env:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(qrmatic::api::SessionGuard)
                .app_data($env.state.clone())
                .configure(qrmatic::api::configure),
        )
        .await
    };
}

pub async fn body_string<B: actix_web::body::MessageBody>(
    resp: actix_web::dev::ServiceResponse<B>,
) -> String {
    let bytes = actix_web::test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}

pub fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
