mod common;

use std::sync::atomic::Ordering;

use attendo_client::models::{ClockStatus, UserRole};
use attendo_client::{AttendoClient, ClientError, HttpClient, TokenStore};
use common::{EMAIL, PASSWORD, TOKEN, TestServer};

#[tokio::test]
async fn test_login_populates_session_and_unwraps_envelope() {
    let server = TestServer::start().await;
    let client = server.client();

    let user = client.login(EMAIL, PASSWORD).await.unwrap();
    assert_eq!(user.role, UserRole::Employee);
    assert!(client.session().is_authenticated());
    assert_eq!(client.session().token().as_deref(), Some(TOKEN));
    assert!(server.config().token_path().exists());

    let status = client.attendance_status().await.unwrap();
    assert_eq!(status.status, ClockStatus::ClockedOut);
    assert!(status.work_start_time.is_none());
}

#[tokio::test]
async fn test_bad_credentials_do_not_count_toward_logout() {
    let server = TestServer::start().await;
    let client = server.client();

    let err = client.login(EMAIL, "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ref m) if m == "Invalid credentials"));
    assert!(!client.session().is_authenticated());
    assert_eq!(client.session().unauthorized_streak(), 0);
}

#[tokio::test]
async fn test_calls_without_token_fail_locally() {
    let server = TestServer::start().await;
    let client = server.client();
    let err = client.attendance_status().await.unwrap_err();
    assert!(matches!(err, ClientError::NotLoggedIn));
    assert_eq!(server.backend.status_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_three_unauthorized_responses_log_out() {
    let server = TestServer::start().await;
    let client = server.logged_in_client().await;
    let mut auth_rx = client.session().subscribe();
    auth_rx.borrow_and_update();

    server.backend.reject_tokens.store(true, Ordering::SeqCst);
    for _ in 0..2 {
        let err = client.attendance_status().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(client.session().is_authenticated());
    }
    assert_eq!(client.session().unauthorized_streak(), 2);

    assert!(client.attendance_status().await.unwrap_err().is_unauthorized());
    assert!(!client.session().is_authenticated());
    assert!(client.session().user().is_none());
    assert!(!server.config().token_path().exists());
    assert!(auth_rx.has_changed().unwrap());
    assert!(!*auth_rx.borrow());

    // token is gone, nothing reaches the server any more
    assert!(matches!(client.attendance_status().await, Err(ClientError::NotLoggedIn)));
}

#[tokio::test]
async fn test_success_resets_unauthorized_streak() {
    let server = TestServer::start().await;
    let client = server.logged_in_client().await;

    server.backend.reject_tokens.store(true, Ordering::SeqCst);
    assert!(client.attendance_status().await.is_err());
    assert!(client.attendance_status().await.is_err());

    server.backend.reject_tokens.store(false, Ordering::SeqCst);
    client.attendance_status().await.unwrap();
    assert_eq!(client.session().unauthorized_streak(), 0);

    server.backend.reject_tokens.store(true, Ordering::SeqCst);
    assert!(client.attendance_status().await.is_err());
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_restore_from_stored_token() {
    let server = TestServer::start().await;
    server.logged_in_client().await;

    let fresh = server.client();
    let user = fresh.restore().await.unwrap().expect("stored session");
    assert_eq!(user.email, EMAIL);
    assert!(fresh.session().is_authenticated());

    server.backend.reject_tokens.store(true, Ordering::SeqCst);
    let expired = server.client();
    assert!(expired.restore().await.unwrap().is_none());
    assert!(!server.config().token_path().exists());
}

#[tokio::test]
async fn test_restore_without_token_is_none() {
    let server = TestServer::start().await;
    let store = attendo_client::MemoryTokenStore::new();
    assert!(store.load().is_none());
    let client = AttendoClient::with_parts(
        attendo_client::NetworkHttpClient::new(&server.config()).unwrap(),
        std::sync::Arc::new(store),
        server.config(),
    );
    assert!(client.restore().await.unwrap().is_none());
}

#[tokio::test]
async fn test_employee_cannot_read_settings() {
    let server = TestServer::start().await;
    let client = server.logged_in_client().await;
    let err = client.settings().await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
}

#[tokio::test]
async fn test_logout_clears_everything() {
    let server = TestServer::start().await;
    let client = server.logged_in_client().await;
    client.logout().unwrap();
    assert!(!client.session().is_authenticated());
    assert!(client.http().token().is_none());
    assert!(!server.config().token_path().exists());
}
