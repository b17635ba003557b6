//! Redirect tests
//!
//! `/r/{short_code}`: dynamic codes answer 307 and log exactly one scan;
//! static, unknown and malformed codes answer the 404 page.

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use chrono::{Duration, Utc};

use common::{TestEnv, body_string, location};
use qrmatic::storage::QrKind;

const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

#[actix_rt::test]
async fn test_dynamic_code_redirects_and_logs_scan() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let qr = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/landing")
        .await;
    let app = init_app!(env);

    let req = TestRequest::get()
        .uri(&format!("/r/{}", qr.short_code))
        .insert_header(("X-Forwarded-For", "198.51.100.4, 10.0.0.1"))
        .insert_header(("User-Agent", IPHONE_UA))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp).as_deref(), Some("https://example.com/landing"));

    assert_eq!(env.wait_for_scans(&qr, 1).await, 1);

    let scans = env
        .storage
        .scans_since(&qr.id, Utc::now() - Duration::days(1))
        .await
        .unwrap();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].ip_address, "198.51.100.4");
    assert_eq!(scans[0].user_agent, IPHONE_UA);
}

#[actix_rt::test]
async fn test_retargeted_code_follows_new_target() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let qr = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/old")
        .await;
    env.state
        .qr
        .update_target(&user.id, &qr.id, "https://example.com/new")
        .await
        .unwrap();
    let app = init_app!(env);

    let req = TestRequest::get()
        .uri(&format!("/r/{}", qr.short_code))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&resp).as_deref(), Some("https://example.com/new"));
}

#[actix_rt::test]
async fn test_missing_headers_fall_back() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let qr = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/")
        .await;
    let app = init_app!(env);

    let req = TestRequest::get()
        .uri(&format!("/r/{}", qr.short_code))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    assert_eq!(env.wait_for_scans(&qr, 1).await, 1);
    let scans = env
        .storage
        .scans_since(&qr.id, Utc::now() - Duration::days(1))
        .await
        .unwrap();
    assert_eq!(scans[0].user_agent, "");
    assert!(!scans[0].ip_address.is_empty());
}

#[actix_rt::test]
async fn test_oversized_forwarded_header_still_logs_scan() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let qr = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/")
        .await;
    let app = init_app!(env);

    let req = TestRequest::get()
        .uri(&format!("/r/{}", qr.short_code))
        .insert_header(("X-Forwarded-For", "x".repeat(200)))
        .insert_header(("X-Real-IP", "198.51.100.9"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    assert_eq!(env.wait_for_scans(&qr, 1).await, 1);
    let scans = env
        .storage
        .scans_since(&qr.id, Utc::now() - Duration::days(1))
        .await
        .unwrap();
    assert_eq!(scans[0].ip_address, "198.51.100.9");
}

#[actix_rt::test]
async fn test_static_code_is_not_redirected() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let qr = env
        .create_qr(&user, QrKind::Static, "https://example.com/printed")
        .await;
    let app = init_app!(env);

    let req = TestRequest::get()
        .uri(&format!("/r/{}", qr.short_code))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_string(resp).await;
    assert!(body.contains("QR Code Not Found"));

    // 给可能的异步写入留出时间
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert_eq!(env.storage.count_scans(&qr.id).await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_unknown_code_returns_not_found_page() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let req = TestRequest::get().uri("/r/zzzzzz").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    let body = body_string(resp).await;
    assert!(body.contains("QR Code Not Found"));
}

#[actix_rt::test]
async fn test_malformed_code_returns_not_found_page() {
    let env = TestEnv::new().await;
    let app = init_app!(env);

    let req = TestRequest::get().uri("/r/NOT-VALID").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
