//! Handler 公共工具：JSON 响应、页面渲染、Session Cookie

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use askama::Template;
use serde::Serialize;
use tracing::error;

use crate::api::constants::SESSION_COOKIE_NAME;
use crate::api::state::CookieSettings;
use crate::errors::QrmaticError;

use super::templates::NotFoundPage;

/// 成功时的 `code`
pub const SUCCESS_CODE: i32 = 0;

/// JSON envelope shared by every JSON endpoint.
#[derive(Serialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: i32,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code,
            message: message.into(),
            data,
        })
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, SUCCESS_CODE, "OK", Some(data))
}

/// 从 QrmaticError 构建错误响应（HTTP 状态与数字错误码来自错误本身）
pub fn error_response(err: &QrmaticError) -> HttpResponse {
    json_response::<()>(err.http_status(), err.numeric_code(), err.message(), None)
}

/// 渲染 HTML 页面，模板错误时返回 500
pub fn render_page<T: Template>(status: StatusCode, page: &T) -> HttpResponse {
    match page.render() {
        Ok(html) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            let err = QrmaticError::from(e);
            error!("{}", err);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body("Internal Server Error")
        }
    }
}

/// 404 "QR Code Not Found" 页面
pub fn not_found_page() -> HttpResponse {
    render_page(StatusCode::NOT_FOUND, &NotFoundPage::new())
}

/// 页面请求的未预期错误：记录日志并返回 500 纯文本
pub fn internal_error(context: &str, err: &QrmaticError) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body("Internal Server Error")
}

/// 表单提交成功后跳转（Post/Redirect/Get）
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location.to_string()))
        .finish()
}

/// Session cookie 构建器
pub struct SessionCookies<'a> {
    settings: &'a CookieSettings,
}

impl<'a> SessionCookies<'a> {
    pub fn new(settings: &'a CookieSettings) -> Self {
        Self { settings }
    }

    fn build(&self, value: String, max_age: actix_web::cookie::time::Duration) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE_NAME, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.settings.secure);
        cookie.set_same_site(SameSite::from(self.settings.same_site));
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn session(&self, token: String) -> Cookie<'static> {
        self.build(
            token,
            actix_web::cookie::time::Duration::minutes(self.settings.max_age_minutes),
        )
    }

    /// 登出时覆盖为立即过期
    pub fn expired(&self) -> Cookie<'static> {
        self.build(String::new(), actix_web::cookie::time::Duration::ZERO)
    }
}
