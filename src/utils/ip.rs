//! 客户端 IP 提取
//!
//! 顺序：X-Forwarded-For 第一项 → X-Real-IP → 连接对端地址 → "unknown"
//! 转发头的值须是合法 IP，否则跳到下一个来源。

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

pub const UNKNOWN_IP: &str = "unknown";

/// 从请求提取客户端 IP，总是返回一个值
pub fn extract_client_ip(req: &HttpRequest) -> String {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

/// 从 HeaderMap 提取转发的 IP
///
/// 只接受能解析为 IP 地址的值；X-Forwarded-For 第一项不合法时退回 X-Real-IP。
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    // 优先 X-Forwarded-For（取第一个，即原始客户端 IP）
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(parse_ip)
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .and_then(parse_ip)
        })
}

/// 解析为规范形式的 IP，兼容带端口的写法（`1.2.3.4:80`、`[::1]:80`）
fn parse_ip(raw: &str) -> Option<String> {
    let raw = raw.trim();
    raw.parse::<IpAddr>()
        .or_else(|_| raw.parse::<SocketAddr>().map(|addr| addr.ip()))
        .ok()
        .map(|ip| ip.to_string())
}

/// User-Agent 请求头，缺失时为空字符串；非 ASCII 字节按 UTF-8 宽松解码
pub fn extract_user_agent(req: &HttpRequest) -> String {
    req.headers()
        .get("user-agent")
        .map(|h| String::from_utf8_lossy(h.as_bytes()).into_owned())
        .unwrap_or_default()
}
