//! Storage backend tests on a temporary SQLite database

mod common;

use chrono::{Duration, Utc};

use common::{TEST_PASSWORD, TestEnv};
use qrmatic::errors::QrmaticError;
use qrmatic::storage::{QrCode, QrKind};

#[tokio::test]
async fn test_duplicate_short_code_is_conflict() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let existing = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/a")
        .await;

    let now = Utc::now();
    let clash = QrCode {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.id.clone(),
        kind: QrKind::Static,
        short_code: existing.short_code.clone(),
        target_url: "https://example.com/b".to_string(),
        created_at: now,
        updated_at: now,
    };

    let err = env.storage.insert_qrcode(&clash).await.unwrap_err();
    assert!(matches!(err, QrmaticError::Conflict(_)), "{:?}", err);
}

#[tokio::test]
async fn test_find_is_owner_scoped() {
    let env = TestEnv::new().await;
    let owner = env.create_user("owner@example.com").await;
    let other = env.create_user("other@example.com").await;
    let qr = env
        .create_qr(&owner, QrKind::Dynamic, "https://example.com/")
        .await;

    assert!(
        env.storage
            .find_qrcode_for_user(&owner.id, &qr.id)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        env.storage
            .find_qrcode_for_user(&other.id, &qr.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        env.storage
            .update_qrcode_target(&other.id, &qr.id, "https://evil.example/", Utc::now())
            .await
            .unwrap()
            .is_none()
    );
    assert!(!env.storage.delete_qrcode(&other.id, &qr.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_cascades_scans_only_for_that_code() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let doomed = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/1")
        .await;
    let kept = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/2")
        .await;
    env.insert_scan(&doomed, Utc::now(), "ua").await;
    env.insert_scan(&doomed, Utc::now(), "ua").await;
    env.insert_scan(&kept, Utc::now(), "ua").await;

    assert!(env.storage.delete_qrcode(&user.id, &doomed.id).await.unwrap());

    assert_eq!(env.storage.count_scans(&doomed.id).await.unwrap(), 0);
    assert_eq!(env.storage.count_scans(&kept.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_scans_since_is_ascending_and_windowed() {
    let env = TestEnv::new().await;
    let user = env.create_user("owner@example.com").await;
    let qr = env
        .create_qr(&user, QrKind::Dynamic, "https://example.com/")
        .await;
    let now = Utc::now();
    env.insert_scan(&qr, now - Duration::hours(1), "b").await;
    env.insert_scan(&qr, now - Duration::days(2), "a").await;
    env.insert_scan(&qr, now - Duration::days(40), "old").await;

    let scans = env
        .storage
        .scans_since(&qr.id, now - Duration::days(30))
        .await
        .unwrap();
    let agents: Vec<&str> = scans.iter().map(|s| s.user_agent.as_str()).collect();
    assert_eq!(agents, vec!["a", "b"]);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let env = TestEnv::new().await;
    env.create_user("owner@example.com").await;

    let err = env
        .state
        .auth
        .create_user("OWNER@example.com", TEST_PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, QrmaticError::Conflict(_)), "{:?}", err);
}

#[tokio::test]
async fn test_set_password_changes_login() {
    let env = TestEnv::new().await;
    env.create_user("owner@example.com").await;

    env.state
        .auth
        .set_password("owner@example.com", "a-brand-new-password")
        .await
        .unwrap();

    assert!(
        env.state
            .auth
            .login("owner@example.com", TEST_PASSWORD)
            .await
            .is_err()
    );
    let user = env
        .state
        .auth
        .login("owner@example.com", "a-brand-new-password")
        .await
        .unwrap();
    assert_eq!(user.email, "owner@example.com");
}

#[tokio::test]
async fn test_set_password_for_unknown_user() {
    let env = TestEnv::new().await;
    let err = env
        .state
        .auth
        .set_password("ghost@example.com", "whatever-password")
        .await
        .unwrap_err();
    assert!(matches!(err, QrmaticError::NotFound(_)));
}
