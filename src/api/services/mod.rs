pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod helpers;
pub mod qr;
pub mod redirect;
pub mod templates;

pub use assets::AssetService;
pub use auth::{AuthPages, LoginKeyExtractor, login_rate_limiter};
pub use dashboard::DashboardPages;
pub use health::HealthService;
pub use helpers::ApiResponse;
pub use qr::QrPages;
pub use redirect::RedirectService;
