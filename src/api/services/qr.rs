//! 单个二维码：统计页、统计 JSON、图片下载

use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::analytics::AnalyticsReport;
use crate::api::middleware::SessionUser;
use crate::api::state::AppState;
use crate::errors::QrmaticError;
use crate::services::{render_png, render_svg};
use crate::storage::QrCode;

use super::dashboard::inline_image;
use super::helpers::{error_response, internal_error, not_found_page, render_page, success_response};
use super::templates::AnalyticsPage;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub format: Option<String>,
}

/// 下载格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// 缺省为 PNG，未知格式返回 None
    pub fn parse(format: Option<&str>) -> Option<Self> {
        match format.map(|f| f.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("png") => Some(Self::Png),
            Some("svg") => Some(Self::Svg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

pub fn attachment_header(short_code: &str, format: ImageFormat) -> String {
    format!(
        "attachment; filename=\"qr-{}.{}\"",
        short_code,
        format.extension()
    )
}

#[derive(Debug, Serialize)]
pub struct AnalyticsPayload {
    pub qr: QrCode,
    pub encoded_url: String,
    pub window_days: u32,
    pub report: AnalyticsReport,
}

pub struct QrPages;

impl QrPages {
    pub async fn analytics(
        state: web::Data<AppState>,
        user: SessionUser,
        path: web::Path<String>,
    ) -> impl Responder {
        let id = path.into_inner();

        let qr = match state.qr.get(&user.id, &id).await {
            Ok(qr) => qr,
            Err(QrmaticError::NotFound(_)) => return not_found_page(),
            Err(e) => return internal_error("Failed to load QR code", &e),
        };

        match state.analytics.report_for(&qr, Utc::now()).await {
            Ok(report) => {
                let page = AnalyticsPage::new(
                    &user.email,
                    &qr,
                    state.qr.encoded_url(&qr),
                    inline_image(&state, &qr),
                    state.analytics.window_days(),
                    &report,
                );
                render_page(StatusCode::OK, &page)
            }
            Err(e) => internal_error("Failed to build analytics", &e),
        }
    }

    pub async fn analytics_json(
        state: web::Data<AppState>,
        user: SessionUser,
        path: web::Path<String>,
    ) -> impl Responder {
        let id = path.into_inner();

        let qr = match state.qr.get(&user.id, &id).await {
            Ok(qr) => qr,
            Err(e) => return error_response(&e),
        };

        match state.analytics.report_for(&qr, Utc::now()).await {
            Ok(report) => success_response(AnalyticsPayload {
                encoded_url: state.qr.encoded_url(&qr),
                window_days: state.analytics.window_days(),
                qr,
                report,
            }),
            Err(e) => error_response(&e),
        }
    }

    pub async fn download(
        state: web::Data<AppState>,
        user: SessionUser,
        path: web::Path<String>,
        query: web::Query<DownloadQuery>,
    ) -> impl Responder {
        let id = path.into_inner();

        let Some(format) = ImageFormat::parse(query.format.as_deref()) else {
            return error_response(&QrmaticError::validation(
                "Unsupported format, expected png or svg",
            ));
        };

        let qr = match state.qr.get(&user.id, &id).await {
            Ok(qr) => qr,
            Err(QrmaticError::NotFound(_)) => return not_found_page(),
            Err(e) => return internal_error("Failed to load QR code", &e),
        };

        let data = state.qr.encoded_url(&qr);
        let (size, margin) = (state.render.size, state.render.margin);
        let body = match format {
            ImageFormat::Png => render_png(&data, size, margin),
            ImageFormat::Svg => render_svg(&data, size, margin).map(String::into_bytes),
        };

        match body {
            Ok(bytes) => {
                trace!("Serving {} download for {}", format.extension(), qr.short_code);
                HttpResponse::Ok()
                    .insert_header((CONTENT_TYPE, format.content_type()))
                    .insert_header((CONTENT_DISPOSITION, attachment_header(&qr.short_code, format)))
                    .body(bytes)
            }
            Err(e) => internal_error("Failed to render QR code", &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(ImageFormat::parse(None), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::parse(Some("PNG")), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::parse(Some("svg")), Some(ImageFormat::Svg));
        assert_eq!(ImageFormat::parse(Some("gif")), None);
    }

    #[test]
    fn test_attachment_header() {
        assert_eq!(
            attachment_header("ab12cd", ImageFormat::Png),
            "attachment; filename=\"qr-ab12cd.png\""
        );
        assert_eq!(
            attachment_header("ab12cd", ImageFormat::Svg),
            "attachment; filename=\"qr-ab12cd.svg\""
        );
    }
}
