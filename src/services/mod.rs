//! Service layer for business logic
//!
//! Shared between the HTTP handlers and the CLI. Handlers never talk to
//! storage directly.

mod analytics_service;
mod auth_service;
pub mod qr_render;
mod qr_service;
mod scan_recorder;

pub use analytics_service::AnalyticsService;
pub use auth_service::{AuthService, normalize_email};
pub use qr_render::{png_data_url, render_png, render_svg};
pub use qr_service::{
    CreateQrRequest, MAX_SHORT_CODE_ATTEMPTS, QrService, ShortCodeSource, encoded_url,
};
pub use scan_recorder::ScanRecorder;
