//! 仪表盘页面：列表、创建、编辑、删除

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use tracing::{error, info};

use crate::api::constants::DASHBOARD_PATH;
use crate::api::middleware::SessionUser;
use crate::api::state::AppState;
use crate::errors::QrmaticError;
use crate::services::{CreateQrRequest, png_data_url, render_png};
use crate::storage::{QrCode, QrKind};

use super::helpers::{internal_error, not_found_page, render_page, see_other};
use super::templates::{CreatedPage, DashboardPage, EditQrPage, NewQrPage};

#[derive(Debug, Deserialize)]
pub struct NewQrForm {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub target_url: String,
}

#[derive(Debug, Deserialize)]
pub struct EditQrForm {
    #[serde(default)]
    pub target_url: String,
}

/// 内联预览图；渲染失败时返回空串，页面只保留下载链接
pub(super) fn inline_image(state: &AppState, qr: &QrCode) -> String {
    let data = state.qr.encoded_url(qr);
    match render_png(&data, state.render.size, state.render.margin) {
        Ok(png) => png_data_url(&png),
        Err(e) => {
            error!("Failed to render preview for {}: {}", qr.short_code, e);
            String::new()
        }
    }
}

pub struct DashboardPages;

impl DashboardPages {
    pub async fn index() -> impl Responder {
        HttpResponse::Found()
            .insert_header(("Location", DASHBOARD_PATH))
            .finish()
    }

    pub async fn list(state: web::Data<AppState>, user: SessionUser) -> impl Responder {
        match state.qr.list(&user.id).await {
            Ok(summaries) => {
                render_page(StatusCode::OK, &DashboardPage::new(&user.email, &summaries))
            }
            Err(e) => internal_error("Failed to list QR codes", &e),
        }
    }

    pub async fn new_form(user: SessionUser) -> impl Responder {
        render_page(StatusCode::OK, &NewQrPage::blank(&user.email))
    }

    pub async fn create(
        state: web::Data<AppState>,
        user: SessionUser,
        form: web::Form<NewQrForm>,
    ) -> impl Responder {
        let NewQrForm { kind, target_url } = form.into_inner();

        let Ok(parsed_kind) = kind.trim().to_lowercase().parse::<QrKind>() else {
            let page = NewQrPage::new(
                &user.email,
                &kind,
                &target_url,
                Some("Please choose a QR code type".to_string()),
            );
            return render_page(StatusCode::BAD_REQUEST, &page);
        };

        let request = CreateQrRequest {
            kind: parsed_kind,
            target_url: target_url.clone(),
        };

        match state.qr.create(&user.id, request).await {
            Ok(qr) => {
                info!("User {} created {} QR code {}", user.email, qr.kind, qr.short_code);
                let page = CreatedPage::new(
                    &user.email,
                    &qr,
                    state.qr.encoded_url(&qr),
                    inline_image(&state, &qr),
                );
                render_page(StatusCode::OK, &page)
            }
            Err(e) => {
                if !matches!(e, QrmaticError::Validation(_)) {
                    error!("Failed to create QR code: {}", e);
                }
                let page = NewQrPage::new(
                    &user.email,
                    parsed_kind.as_ref(),
                    &target_url,
                    Some(e.message().to_string()),
                );
                render_page(e.http_status(), &page)
            }
        }
    }

    pub async fn edit_form(
        state: web::Data<AppState>,
        user: SessionUser,
        path: web::Path<String>,
    ) -> impl Responder {
        let id = path.into_inner();

        match state.qr.get(&user.id, &id).await {
            Ok(qr) => {
                // 静态码只显示提示，不提供表单
                let error = (!qr.kind.is_dynamic())
                    .then(|| "Only dynamic QR codes can be edited".to_string());
                render_page(
                    StatusCode::OK,
                    &EditQrPage::new(&user.email, &qr, &qr.target_url, error),
                )
            }
            Err(QrmaticError::NotFound(_)) => not_found_page(),
            Err(e) => internal_error("Failed to load QR code", &e),
        }
    }

    pub async fn update(
        state: web::Data<AppState>,
        user: SessionUser,
        path: web::Path<String>,
        form: web::Form<EditQrForm>,
    ) -> impl Responder {
        let id = path.into_inner();
        let target_url = form.into_inner().target_url;

        match state.qr.update_target(&user.id, &id, &target_url).await {
            Ok(_) => see_other(DASHBOARD_PATH),
            Err(QrmaticError::NotFound(_)) => not_found_page(),
            Err(e) => {
                // 重新取一次记录用于回显表单
                match state.qr.get(&user.id, &id).await {
                    Ok(qr) => {
                        let page = EditQrPage::new(
                            &user.email,
                            &qr,
                            &target_url,
                            Some(e.message().to_string()),
                        );
                        render_page(e.http_status(), &page)
                    }
                    Err(QrmaticError::NotFound(_)) => not_found_page(),
                    Err(reload_err) => internal_error("Failed to load QR code", &reload_err),
                }
            }
        }
    }

    pub async fn delete(
        state: web::Data<AppState>,
        user: SessionUser,
        path: web::Path<String>,
    ) -> HttpResponse {
        let id = path.into_inner();

        match state.qr.delete(&user.id, &id).await {
            Ok(()) => {
                info!("User {} deleted QR code {}", user.email, id);
                see_other(DASHBOARD_PATH)
            }
            Err(QrmaticError::NotFound(_)) => not_found_page(),
            Err(e) => internal_error("Failed to delete QR code", &e),
        }
    }
}
