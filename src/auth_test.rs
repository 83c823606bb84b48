use super::*;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::storage::MemoryStorage;
use crate::testutil::spawn_stub;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

fn memory_store() -> SessionStore {
    SessionStore::new(Box::new(MemoryStorage::new()))
}

// =============================================================================
// auth_headers
// =============================================================================

#[test]
fn headers_without_token_carry_only_content_type() {
    let store = memory_store();
    let headers = auth_headers(&store);
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn headers_with_token_carry_bearer() {
    let mut store = memory_store();
    store.set("abc", "alice");
    let headers = auth_headers(&store);
    assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
}

#[test]
fn headers_follow_store_after_clear() {
    let mut store = memory_store();
    store.set("abc", "alice");
    store.clear();
    assert!(auth_headers(&store).get(AUTHORIZATION).is_none());
}

// =============================================================================
// Local validation
// =============================================================================

#[tokio::test]
async fn empty_username_fails_without_network() {
    // Unroutable base URL: any network attempt would surface as Transport.
    let config = ApiConfig::new("http://127.0.0.1:1");
    let mut flow = LoginFlow::new(&config).unwrap();
    let mut store = memory_store();

    let error = flow.login(&mut store, "", "x").await.unwrap_err();
    assert!(matches!(error, ApiError::Validation { field: "username" }));
    assert_eq!(flow.state(), LoginState::Idle);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn empty_password_fails_without_network() {
    let config = ApiConfig::new("http://127.0.0.1:1");
    let mut flow = LoginFlow::new(&config).unwrap();
    let mut store = memory_store();

    let error = flow.login(&mut store, "alice", "").await.unwrap_err();
    assert!(matches!(error, ApiError::Validation { field: "password" }));
    assert_eq!(flow.state(), LoginState::Idle);
}

// =============================================================================
// Login against a stub backend
// =============================================================================

#[tokio::test]
async fn login_success_populates_session() {
    let (base_url, request) = spawn_stub(200, r#"{"token":"abc"}"#).await;
    let config = ApiConfig::new(&base_url);
    let mut flow = LoginFlow::new(&config).unwrap();
    let mut store = memory_store();

    let token = flow.login(&mut store, "alice", "secret").await.unwrap();
    assert_eq!(token, "abc");
    assert_eq!(flow.state(), LoginState::Authenticated);
    assert!(store.is_authenticated());
    assert_eq!(store.token(), Some("abc"));
    assert_eq!(store.current_username(), Some("alice"));

    let raw = request.await.unwrap();
    assert!(raw.starts_with("POST /login"), "unexpected request: {raw}");
    // base64("alice:secret")
    assert!(raw.contains("Basic YWxpY2U6c2VjcmV0"), "missing basic auth: {raw}");
    assert!(!raw.contains("Bearer"), "login must not send a bearer token: {raw}");
}

#[tokio::test]
async fn login_rejection_leaves_store_untouched() {
    let (base_url, _request) = spawn_stub(401, r#"{"error":"bad credentials"}"#).await;
    let config = ApiConfig::new(&base_url);
    let mut flow = LoginFlow::new(&config).unwrap();
    let mut store = memory_store();

    let error = flow.login(&mut store, "alice", "wrong").await.unwrap_err();
    assert!(matches!(error, ApiError::Authentication));
    assert_eq!(flow.state(), LoginState::Failed);
    assert!(!store.is_authenticated());
    assert_eq!(store.current_username(), None);
}

#[tokio::test]
async fn login_server_fault_maps_to_transport() {
    let (base_url, _request) = spawn_stub(500, "{}").await;
    let config = ApiConfig::new(&base_url);
    let mut flow = LoginFlow::new(&config).unwrap();
    let mut store = memory_store();

    let error = flow.login(&mut store, "alice", "secret").await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
    assert_eq!(flow.state(), LoginState::Failed);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn login_malformed_success_body_fails_cleanly() {
    let (base_url, _request) = spawn_stub(200, r#"{"tokn":"abc"}"#).await;
    let config = ApiConfig::new(&base_url);
    let mut flow = LoginFlow::new(&config).unwrap();
    let mut store = memory_store();

    let error = flow.login(&mut store, "alice", "secret").await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
    assert_eq!(flow.state(), LoginState::Failed);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn failed_then_successful_attempt_is_independent() {
    let config_down = ApiConfig::new("http://127.0.0.1:1");
    let mut flow = LoginFlow::new(&config_down).unwrap();
    let mut store = memory_store();
    assert!(flow.login(&mut store, "alice", "secret").await.is_err());
    assert_eq!(flow.state(), LoginState::Failed);

    let (base_url, _request) = spawn_stub(200, r#"{"token":"abc"}"#).await;
    let mut flow = LoginFlow::new(&ApiConfig::new(&base_url)).unwrap();
    let token = flow.login(&mut store, "alice", "secret").await.unwrap();
    assert_eq!(token, "abc");
    assert_eq!(flow.state(), LoginState::Authenticated);
}

// =============================================================================
// logout
// =============================================================================

#[test]
fn logout_clears_session() {
    let mut store = memory_store();
    store.set("abc", "alice");
    logout(&mut store);
    assert!(!store.is_authenticated());
    assert_eq!(store.current_username(), None);
}

// =============================================================================
// parse_login_response
// =============================================================================

#[test]
fn parse_login_response_extracts_token() {
    assert_eq!(parse_login_response(r#"{"token":"abc"}"#).unwrap(), "abc");
}

#[test]
fn parse_login_response_rejects_non_json() {
    assert!(parse_login_response("<html>oops</html>").is_err());
}
