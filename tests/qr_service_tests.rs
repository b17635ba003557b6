//! QrService tests: short-code allocation on a tiny code space

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use common::{PUBLIC_BASE_URL, TestEnv};
use qrmatic::config::QrConfig;
use qrmatic::errors::QrmaticError;
use qrmatic::services::{CreateQrRequest, MAX_SHORT_CODE_ATTEMPTS, QrService};
use qrmatic::storage::{QrCode, QrKind};
use qrmatic::utils::short_code::SHORT_CODE_ALPHABET;

fn one_char_service(env: &TestEnv) -> QrService {
    let config = QrConfig {
        short_code_length: 1,
        ..QrConfig::default()
    };
    QrService::new(Arc::clone(&env.storage), &config, PUBLIC_BASE_URL)
}

fn request() -> CreateQrRequest {
    CreateQrRequest {
        kind: QrKind::Dynamic,
        target_url: "https://example.com/".to_string(),
    }
}

/// 按顺序返回给定短码，用完后重复最后一个
fn scripted(codes: &'static [&'static str]) -> (Arc<AtomicUsize>, impl Fn(usize) -> String) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = move |_len: usize| {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        codes[n.min(codes.len() - 1)].to_string()
    };
    (calls, source)
}

#[tokio::test]
async fn test_collision_is_retried_into_success() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;

    let (_, seed) = scripted(&["a"]);
    let first = one_char_service(&env)
        .with_code_source(seed)
        .create(&user.id, request())
        .await
        .unwrap();
    assert_eq!(first.short_code, "a");

    // 前两次撞上 "a"，第三次拿到 "b"
    let (calls, source) = scripted(&["a", "a", "b"]);
    let second = one_char_service(&env)
        .with_code_source(source)
        .create(&user.id, request())
        .await
        .unwrap();

    assert_eq!(second.short_code, "b");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(env.state.qr.list(&user.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_collisions_give_up_after_max_attempts() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;

    let (_, seed) = scripted(&["z"]);
    one_char_service(&env)
        .with_code_source(seed)
        .create(&user.id, request())
        .await
        .unwrap();

    let (calls, source) = scripted(&["z"]);
    let err = one_char_service(&env)
        .with_code_source(source)
        .create(&user.id, request())
        .await
        .unwrap_err();

    assert!(matches!(err, QrmaticError::Conflict(_)), "{:?}", err);
    assert!(err.message().contains("after 5 attempts"), "{}", err.message());
    assert_eq!(calls.load(Ordering::SeqCst), MAX_SHORT_CODE_ATTEMPTS);
}

#[tokio::test]
async fn test_exhausted_code_space_is_conflict() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;

    // 填满长度为 1 的全部 36 个短码
    let now = Utc::now();
    for &b in SHORT_CODE_ALPHABET {
        let qr = QrCode {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user.id.clone(),
            kind: QrKind::Dynamic,
            short_code: (b as char).to_string(),
            target_url: "https://example.com/".to_string(),
            created_at: now,
            updated_at: now,
        };
        env.storage.insert_qrcode(&qr).await.unwrap();
    }

    let err = one_char_service(&env)
        .create(&user.id, request())
        .await
        .unwrap_err();
    assert!(matches!(err, QrmaticError::Conflict(_)), "{:?}", err);
    assert_eq!(
        env.state.qr.list(&user.id).await.unwrap().len(),
        SHORT_CODE_ALPHABET.len()
    );
}

#[tokio::test]
async fn test_invalid_url_never_allocates_a_code() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;

    let (calls, source) = scripted(&["q"]);
    let err = one_char_service(&env)
        .with_code_source(source)
        .create(
            &user.id,
            CreateQrRequest {
                kind: QrKind::Static,
                target_url: "javascript:alert(1)".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, QrmaticError::Validation(_)), "{:?}", err);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
