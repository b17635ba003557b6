//! 登录与登出

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use governor::middleware::NoOpMiddleware;
use serde::Deserialize;
use tracing::{error, info};

use crate::api::constants::{DASHBOARD_PATH, LOGIN_PATH};
use crate::api::state::AppState;
use crate::errors::QrmaticError;
use crate::utils::ip::UNKNOWN_IP;

use super::helpers::{SessionCookies, render_page};
use super::templates::LoginPage;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// 登录限流 key：TCP 对端 IP
///
/// 拿不到对端地址时（如测试请求）归入同一个 "unknown" 桶，不报错。
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        Ok(req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_IP.to_string()))
    }
}

/// 登录接口限流：每秒补充 1 个令牌，突发 5 次，超出返回 429
pub fn login_rate_limiter() -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");
    Governor::new(&config)
}

pub struct AuthPages;

impl AuthPages {
    pub async fn login_form() -> impl Responder {
        render_page(StatusCode::OK, &LoginPage::new(String::new(), None))
    }

    pub async fn login(
        state: web::Data<AppState>,
        form: web::Form<LoginForm>,
    ) -> impl Responder {
        let LoginForm { email, password } = form.into_inner();

        let user = match state.auth.login(&email, &password).await {
            Ok(user) => user,
            Err(e @ QrmaticError::Unauthorized(_)) => {
                let page = LoginPage::new(email, Some(e.message().to_string()));
                return render_page(e.http_status(), &page);
            }
            Err(e) => {
                error!("Login failed: {}", e);
                return render_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &LoginPage::new(email, Some("Login is temporarily unavailable".to_string())),
                );
            }
        };

        let token = match state.jwt.generate_session_token(&user) {
            Ok(token) => token,
            Err(e) => {
                error!("Failed to sign session token: {}", e);
                return render_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &LoginPage::new(email, Some("Login is temporarily unavailable".to_string())),
                );
            }
        };

        HttpResponse::SeeOther()
            .insert_header(("Location", DASHBOARD_PATH))
            .cookie(SessionCookies::new(&state.cookies).session(token))
            .finish()
    }

    pub async fn logout(state: web::Data<AppState>) -> impl Responder {
        info!("User logged out");
        HttpResponse::SeeOther()
            .insert_header(("Location", LOGIN_PATH))
            .cookie(SessionCookies::new(&state.cookies).expired())
            .finish()
    }
}
