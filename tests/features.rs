mod common;

use anyhow::{anyhow, Result};
use common::{api_base, can_bind_localhost, harness, CountingNavigator};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracker_client::{
    features::{
        admin,
        auth::{
            self,
            types::{LoginRequest, RegisterRequest},
            AuthState,
        },
        credits,
        torrents::{
            self,
            types::{TorrentListParams, TorrentUpload},
        },
        users,
    },
    gateway::{ApiClient, ApiError, ClientConfig, FileSessionStore, SessionStore},
};
use wiremock::{
    matchers::{body_json, header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, Request, ResponseTemplate,
};

fn user_json(id: u64, username: &str) -> Value {
    json!({"id": id, "username": username, "email": format!("{username}@tracker.tld")})
}

fn register_request(password_confirm: &str) -> RegisterRequest {
    RegisterRequest {
        username: "bob".to_string(),
        email: "bob@tracker.tld".to_string(),
        password: SecretString::from("hunter22".to_string()),
        password_confirm: SecretString::from(password_confirm.to_string()),
        invite_code: "INV-1".to_string(),
    }
}

#[tokio::test]
async fn login_stores_tokens_and_loads_profile() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"username": "alice", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a1", "refresh": "r1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "alice")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None, None)?;
    let state = AuthState::new(h.client.clone());
    let user = state.login(&LoginRequest::new("alice", "hunter2")).await?;

    assert_eq!(user.username, "alice");
    assert_eq!(state.current_user().map(|u| u.id), Some(1));
    assert_eq!(
        h.session.refresh_token().map(|t| t.expose_secret().to_string()),
        Some("r1".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn failed_login_leaves_no_session() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a1", "refresh": "r1"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = harness(&server, None, None)?;
    let state = AuthState::new(h.client.clone());
    let err = state
        .login(&LoginRequest::new("alice", "hunter2"))
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;

    assert_eq!(err.status(), Some(500));
    assert!(!state.is_authenticated());
    assert!(state.current_user().is_none());
    Ok(())
}

#[tokio::test]
async fn login_without_tokens_is_a_parse_error() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "ok"})))
        .mount(&server)
        .await;

    let h = harness(&server, None, None)?;
    let err = auth::client::login(&h.client, &LoginRequest::new("alice", "x"))
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;

    assert!(matches!(err, ApiError::Parse(_)));
    Ok(())
}

#[tokio::test]
async fn register_validates_before_sending() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, None, None)?;
    let err = auth::client::register(&h.client, &register_request("different"))
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;

    assert!(matches!(err, ApiError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn register_stores_returned_tokens() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .and(body_json(json!({
            "username": "bob",
            "email": "bob@tracker.tld",
            "password": "hunter22",
            "password_confirm": "hunter22",
            "invite_code": "INV-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": user_json(2, "bob"),
            "tokens": {"access_token": "a9", "refresh_token": "r9"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, None, None)?;
    let state = AuthState::new(h.client.clone());
    let user = state.register(&register_request("hunter22")).await?;

    assert_eq!(user.id, 2);
    assert_eq!(
        h.session.access_token().map(|t| t.expose_secret().to_string()),
        Some("a9".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn check_auth_without_token_makes_no_request() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "alice")))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, None, None)?;
    let state = AuthState::new(h.client.clone());
    assert!(state.check_auth().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn check_auth_signs_out_when_refresh_fails() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let state = AuthState::new(h.client.clone());

    assert!(state.check_auth().await?.is_none());
    assert!(!state.is_authenticated());
    assert_eq!(h.navigator.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn check_auth_propagates_server_errors() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let state = AuthState::new(h.client.clone());
    let err = state
        .check_auth()
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;

    assert_eq!(err.status(), Some(503));
    assert!(state.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn torrent_list_sends_only_set_params() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/torrents/"))
        .and(query_param("page", "2"))
        .and(query_param("search", "debian iso"))
        .and(query_param_is_missing("category"))
        .and(query_param_is_missing("ordering"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"info_hash": "abc", "name": "Debian", "size": 1024}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let params = TorrentListParams {
        page: Some(2),
        search: Some("debian iso".to_string()),
        ..TorrentListParams::default()
    };
    let page = torrents::client::list(&h.client, &params).await?;

    assert_eq!(page.count, 1);
    assert!(!page.has_next());
    assert_eq!(page.results[0].display_size(), "1.00 KB");
    Ok(())
}

fn is_torrent_upload(request: &Request) -> bool {
    let content_type = request
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let body = String::from_utf8_lossy(&request.body);

    content_type.starts_with("multipart/form-data")
        && body.matches("name=\"tags\"").count() == 2
        && body.contains("name=\"torrent_file\"; filename=\"debian.torrent\"")
        && body.contains("application/x-bittorrent")
        && body.contains("d4:infoe")
}

#[tokio::test]
async fn torrent_upload_is_multipart() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/torrents/upload/"))
        .and(is_torrent_upload)
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"info_hash": "abc", "name": "Debian"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let upload = TorrentUpload {
        file_name: "debian.torrent".to_string(),
        torrent_file: b"d4:infoe".to_vec(),
        name: "Debian".to_string(),
        description: "netinst".to_string(),
        category: "linux".to_string(),
        tags: vec!["iso".to_string(), "amd64".to_string()],
    };
    let torrent = torrents::client::upload(&h.client, &upload).await?;

    assert_eq!(torrent.info_hash, "abc");
    Ok(())
}

#[tokio::test]
async fn multipart_upload_is_replayed_after_refresh() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/torrents/upload/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/torrents/upload/"))
        .and(header("authorization", "Bearer a2"))
        .and(is_torrent_upload)
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"info_hash": "abc", "name": "Debian"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a2", "refresh": "r2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let upload = TorrentUpload {
        file_name: "debian.torrent".to_string(),
        torrent_file: b"d4:infoe".to_vec(),
        name: "Debian".to_string(),
        description: String::new(),
        category: "linux".to_string(),
        tags: vec!["iso".to_string(), "amd64".to_string()],
    };
    let torrent = torrents::client::upload(&h.client, &upload).await?;

    assert_eq!(torrent.name, "Debian");
    Ok(())
}

#[tokio::test]
async fn torrent_download_returns_raw_bytes() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/torrents/abc/download/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"d8:announce0:e".to_vec(), "application/x-bittorrent"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let bytes = torrents::client::download(&h.client, "abc").await?;

    assert_eq!(bytes, b"d8:announce0:e".to_vec());
    Ok(())
}

#[tokio::test]
async fn malformed_info_hash_is_rejected_before_sending() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let err = torrents::client::download(&h.client, "../../admin/users")
        .await
        .err()
        .ok_or_else(|| anyhow!("expected error"))?;

    assert!(matches!(err, ApiError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn torrent_delete_accepts_empty_body() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/torrents/abc/delete/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    torrents::client::delete(&h.client, "abc").await?;
    Ok(())
}

#[tokio::test]
async fn avatar_removal_sends_empty_field() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/user/profile/"))
        .and(|request: &Request| {
            String::from_utf8_lossy(&request.body).contains("name=\"profile_picture\"")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "alice")))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let user = users::client::remove_avatar(&h.client).await?;

    assert_eq!(user.username, "alice");
    Ok(())
}

#[tokio::test]
async fn credit_check_posts_torrent_id() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/credits/check-download/"))
        .and(body_json(json!({"torrent_id": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "can_download": false,
            "required_credits": "10.00",
            "user_credits": 2.5,
            "reason": "Insufficient credits"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let check = credits::client::check_download(&h.client, "42").await?;

    assert!(!check.can_download);
    assert_eq!(check.user_credits, "2.5");
    assert_eq!(check.reason.as_deref(), Some("Insufficient credits"));
    Ok(())
}

#[tokio::test]
async fn ratio_status_health() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/credits/ratio-status/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ratio": "0.42",
            "status": "",
            "message": "",
            "required_ratio": "0.5"
        })))
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let status = credits::client::ratio_status(&h.client).await?;

    assert_eq!(status.health(), credits::RatioHealth::Critical);
    Ok(())
}

#[tokio::test]
async fn admin_mass_action_merges_params() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/mass-action/"))
        .and(body_json(json!({
            "action": "suspend",
            "user_ids": [3, 4],
            "days": 7
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "count": 2})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let mut params = Map::new();
    params.insert("days".to_string(), json!(7));
    let response = admin::client::mass_action(&h.client, "suspend", &[3, 4], &params).await?;

    assert!(response.success);
    assert_eq!(response.count, 2);
    Ok(())
}

#[tokio::test]
async fn admin_analytics_sends_metric() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/"))
        .and(query_param("metric", "uploads"))
        .and(query_param("days", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"points": []})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Some("a1"), Some("r1"))?;
    let body = admin::client::analytics(
        &h.client,
        "uploads",
        &[("days".to_string(), "30".to_string())],
    )
    .await?;

    assert_eq!(body, json!({"points": []}));
    Ok(())
}

#[tokio::test]
async fn file_session_survives_reopen() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile/"))
        .and(header("authorization", "Bearer a2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "alice")))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a2", "refresh": "r2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session_path = std::env::temp_dir()
        .join(format!("tracker-features-{}", uuid::Uuid::new_v4()))
        .join("session.json");

    let store = FileSessionStore::open(&session_path)?;
    store.store(&tracker_client::gateway::TokenPair::new("a1", "r1"))?;

    let client = ApiClient::new(
        ClientConfig::new(api_base(&server)),
        Arc::new(store),
        Arc::new(CountingNavigator::default()),
    )?;
    let user = users::client::profile(&client).await?;
    assert_eq!(user.username, "alice");

    let reopened = FileSessionStore::open(&session_path)?;
    assert_eq!(
        reopened.access_token().map(|t| t.expose_secret().to_string()),
        Some("a2".to_string())
    );

    if let Some(dir) = session_path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
    Ok(())
}
