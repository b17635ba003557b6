//! API 模块常量定义

/// Session Cookie 名称
pub const SESSION_COOKIE_NAME: &str = "qrmatic_session";

/// JWT `token_type` claim for session tokens
pub const SESSION_TOKEN_TYPE: &str = "session";

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

pub const APP_NAME: &str = "QRMatic";

/// 仪表盘中目标 URL 的最大显示字符数
pub const TARGET_DISPLAY_CHARS: usize = 50;
