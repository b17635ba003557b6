//! Askama page models
//!
//! Each page struct holds display-ready strings; formatting happens here so
//! the templates stay free of logic.

use askama::Template;

use crate::analytics::AnalyticsReport;
use crate::api::constants::{APP_NAME, TARGET_DISPLAY_CHARS};
use crate::storage::{QrCode, QrCodeSummary, QrKind};
use crate::utils::truncate_chars;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const USER_AGENT_DISPLAY_CHARS: usize = 60;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub app_name: &'static str,
    pub email: String,
    pub error: Option<String>,
}

impl LoginPage {
    pub fn new(email: String, error: Option<String>) -> Self {
        Self {
            app_name: APP_NAME,
            email,
            error,
        }
    }
}

/// 仪表盘表格的一行
pub struct QrRow {
    pub id: String,
    pub short_code: String,
    pub target_url: String,
    pub target_display: String,
    pub kind_label: &'static str,
    pub is_dynamic: bool,
    pub scan_count: u64,
    pub created: String,
}

impl From<&QrCodeSummary> for QrRow {
    fn from(summary: &QrCodeSummary) -> Self {
        let qr = &summary.qr;
        Self {
            id: qr.id.clone(),
            short_code: qr.short_code.clone(),
            target_url: qr.target_url.clone(),
            target_display: truncate_chars(&qr.target_url, TARGET_DISPLAY_CHARS),
            kind_label: qr.kind.label(),
            is_dynamic: qr.kind.is_dynamic(),
            scan_count: summary.scan_count,
            created: qr.created_at.format(DATE_FORMAT).to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub app_name: &'static str,
    pub user_email: String,
    pub rows: Vec<QrRow>,
}

impl DashboardPage {
    pub fn new(user_email: &str, summaries: &[QrCodeSummary]) -> Self {
        Self {
            app_name: APP_NAME,
            user_email: user_email.to_string(),
            rows: summaries.iter().map(QrRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "new.html")]
pub struct NewQrPage {
    pub app_name: &'static str,
    pub user_email: String,
    pub kind: String,
    pub target_url: String,
    pub error: Option<String>,
}

impl NewQrPage {
    pub fn new(user_email: &str, kind: &str, target_url: &str, error: Option<String>) -> Self {
        Self {
            app_name: APP_NAME,
            user_email: user_email.to_string(),
            kind: kind.to_string(),
            target_url: target_url.to_string(),
            error,
        }
    }

    pub fn blank(user_email: &str) -> Self {
        Self::new(user_email, QrKind::Dynamic.as_ref(), "", None)
    }
}

/// 创建成功页：内联图片与下载链接
#[derive(Template)]
#[template(path = "created.html")]
pub struct CreatedPage {
    pub app_name: &'static str,
    pub user_email: String,
    pub id: String,
    pub short_code: String,
    pub kind_label: &'static str,
    pub is_dynamic: bool,
    pub target_url: String,
    pub encoded_url: String,
    pub image_data_url: String,
}

impl CreatedPage {
    pub fn new(user_email: &str, qr: &QrCode, encoded_url: String, image_data_url: String) -> Self {
        Self {
            app_name: APP_NAME,
            user_email: user_email.to_string(),
            id: qr.id.clone(),
            short_code: qr.short_code.clone(),
            kind_label: qr.kind.label(),
            is_dynamic: qr.kind.is_dynamic(),
            target_url: qr.target_url.clone(),
            encoded_url,
            image_data_url,
        }
    }
}

#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditQrPage {
    pub app_name: &'static str,
    pub user_email: String,
    pub id: String,
    pub short_code: String,
    pub target_url: String,
    pub editable: bool,
    pub error: Option<String>,
}

impl EditQrPage {
    pub fn new(user_email: &str, qr: &QrCode, target_url: &str, error: Option<String>) -> Self {
        Self {
            app_name: APP_NAME,
            user_email: user_email.to_string(),
            id: qr.id.clone(),
            short_code: qr.short_code.clone(),
            target_url: target_url.to_string(),
            editable: qr.kind.is_dynamic(),
            error,
        }
    }
}

pub struct DayBar {
    pub label: String,
    pub count: u64,
    /// Bar height relative to the busiest day, 0–100.
    pub height: u64,
}

pub struct DeviceRow {
    pub label: String,
    pub count: u64,
    pub percentage: String,
}

pub struct BrowserRow {
    pub name: String,
    pub count: u64,
}

pub struct RecentRow {
    pub time: String,
    pub ip_address: String,
    pub user_agent: String,
    pub device: String,
}

#[derive(Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsPage {
    pub app_name: &'static str,
    pub user_email: String,
    pub id: String,
    pub short_code: String,
    pub kind_label: &'static str,
    pub is_dynamic: bool,
    pub target_url: String,
    pub encoded_url: String,
    pub image_data_url: String,
    pub created: String,
    pub window_days: u32,
    pub total_scans: u64,
    pub last_7_days: u64,
    pub today: u64,
    pub days: Vec<DayBar>,
    pub devices: Vec<DeviceRow>,
    pub browsers: Vec<BrowserRow>,
    pub recent: Vec<RecentRow>,
    /// 静态码没有扫码记录时显示说明
    pub show_static_notice: bool,
}

impl AnalyticsPage {
    pub fn new(
        user_email: &str,
        qr: &QrCode,
        encoded_url: String,
        image_data_url: String,
        window_days: u32,
        report: &AnalyticsReport,
    ) -> Self {
        let peak = report.peak_day();
        let days = report
            .scans_per_day
            .iter()
            .map(|day| DayBar {
                label: day.date.format("%m-%d").to_string(),
                count: day.count,
                height: if peak == 0 { 0 } else { day.count * 100 / peak },
            })
            .collect();

        let devices = report
            .device_breakdown
            .iter()
            .map(|share| DeviceRow {
                label: share.device.as_ref().to_string(),
                count: share.count,
                percentage: format!("{:.1}", share.percentage),
            })
            .collect();

        let browsers = report
            .browser_breakdown
            .iter()
            .map(|share| BrowserRow {
                name: share.browser.clone(),
                count: share.count,
            })
            .collect();

        let recent = report
            .recent_scans
            .iter()
            .map(|scan| RecentRow {
                time: scan.scanned_at.format(DATETIME_FORMAT).to_string(),
                ip_address: scan.ip_address.clone(),
                user_agent: truncate_chars(&scan.user_agent, USER_AGENT_DISPLAY_CHARS),
                device: scan.device.as_ref().to_string(),
            })
            .collect();

        Self {
            app_name: APP_NAME,
            user_email: user_email.to_string(),
            id: qr.id.clone(),
            short_code: qr.short_code.clone(),
            kind_label: qr.kind.label(),
            is_dynamic: qr.kind.is_dynamic(),
            target_url: qr.target_url.clone(),
            encoded_url,
            image_data_url,
            created: qr.created_at.format(DATE_FORMAT).to_string(),
            window_days,
            total_scans: report.total_scans,
            last_7_days: report.last_7_days,
            today: report.today,
            days,
            devices,
            browsers,
            recent,
            show_static_notice: !qr.kind.is_dynamic() && report.total_scans == 0,
        }
    }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub app_name: &'static str,
}

impl NotFoundPage {
    pub fn new() -> Self {
        Self { app_name: APP_NAME }
    }
}

impl Default for NotFoundPage {
    fn default() -> Self {
        Self::new()
    }
}
