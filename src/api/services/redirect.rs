use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::api::state::AppState;
use crate::utils::ip::{extract_client_ip, extract_user_agent};
use crate::utils::short_code::is_valid_short_code;

use super::helpers::not_found_page;

pub struct RedirectService;

impl RedirectService {
    /// `GET /r/{short_code}`
    ///
    /// Dynamic codes log a scan and answer `307`; static, unknown or
    /// malformed codes get the not-found page.
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        state: web::Data<AppState>,
    ) -> impl Responder {
        let short_code = path.into_inner();

        if !is_valid_short_code(&short_code) {
            // 非法短码，直接 404，不查库
            trace!("Invalid short code rejected: {}", short_code);
            return not_found_page();
        }

        match state.qr.resolve_dynamic(&short_code).await {
            Ok(Some(qr)) => {
                let ip = extract_client_ip(&req);
                let user_agent = extract_user_agent(&req);
                // 不等待写入完成
                let _ = state.scans.record(&qr.id, ip, user_agent);

                debug!("Redirecting {} -> {}", short_code, qr.target_url);
                HttpResponse::TemporaryRedirect()
                    .insert_header((LOCATION, qr.target_url))
                    .finish()
            }
            Ok(None) => {
                debug!("No dynamic QR code for short code: {}", short_code);
                not_found_page()
            }
            Err(e) => {
                error!("Redirect lookup failed for {}: {}", short_code, e);
                not_found_page()
            }
        }
    }
}
