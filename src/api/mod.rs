//! HTTP surface
//!
//! Routes, the session guard and the page handlers.

pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;
pub mod state;

use actix_web::web;

pub use middleware::{SessionGuard, SessionUser};
pub use state::AppState;

use services::{
    AssetService, AuthPages, DashboardPages, HealthService, QrPages, RedirectService,
    login_rate_limiter,
};

/// 注册全部路由
///
/// 调用方负责挂载 `web::Data<AppState>` 和 [`SessionGuard`]。
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(DashboardPages::index))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::health_check))
        .route("/assets/{path:.*}", web::get().to(AssetService::handle_asset))
        .route("/r/{short_code}", web::get().to(RedirectService::handle_redirect))
        .route("/r/{short_code}", web::head().to(RedirectService::handle_redirect))
        .service(
            web::resource("/login")
                .route(web::get().to(AuthPages::login_form))
                .route(
                    web::post()
                        .to(AuthPages::login)
                        .wrap(login_rate_limiter()),
                ),
        )
        .route("/logout", web::post().to(AuthPages::logout))
        .service(
            web::scope("/dashboard")
                .route("", web::get().to(DashboardPages::list))
                .route("/new", web::get().to(DashboardPages::new_form))
                .route("/new", web::post().to(DashboardPages::create))
                .route("/edit/{id}", web::get().to(DashboardPages::edit_form))
                .route("/edit/{id}", web::post().to(DashboardPages::update))
                .route("/qr/{id}", web::get().to(QrPages::analytics))
                .route("/qr/{id}/analytics.json", web::get().to(QrPages::analytics_json))
                .route("/qr/{id}/download", web::get().to(QrPages::download))
                .route("/qr/{id}/delete", web::post().to(DashboardPages::delete)),
        );
}
