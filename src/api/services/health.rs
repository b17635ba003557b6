use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::api::state::AppState;

use super::helpers::{SUCCESS_CODE, json_response};

/// 数据库检查超时
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: DatabaseCheck,
    pub response_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub status: &'static str,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
        let start = Instant::now();
        trace!("Received health check request");

        let backend = state.storage.backend_name().to_string();
        let database = match tokio::time::timeout(DB_CHECK_TIMEOUT, state.storage.ping()).await {
            Ok(Ok(())) => DatabaseCheck {
                status: "healthy",
                backend,
                error: None,
            },
            Ok(Err(e)) => {
                error!("Health check: database error: {}", e);
                DatabaseCheck {
                    status: "unhealthy",
                    backend,
                    error: Some(e.to_string()),
                }
            }
            Err(_) => {
                error!("Health check: database ping timed out");
                DatabaseCheck {
                    status: "unhealthy",
                    backend,
                    error: Some("timeout".to_string()),
                }
            }
        };

        let healthy = database.error.is_none();
        let (status, http_status, message) = if healthy {
            ("healthy", StatusCode::OK, "OK")
        } else {
            ("unhealthy", StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
        };

        json_response(
            http_status,
            if healthy { SUCCESS_CODE } else { 1 },
            message,
            Some(HealthStatus {
                status,
                database,
                response_time_ms: start.elapsed().as_millis() as u64,
            }),
        )
    }
}
