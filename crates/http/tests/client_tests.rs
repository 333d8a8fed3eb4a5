//! Integration tests for the CMS admin HTTP client

use cms_admin_http::{AdminClient, ClientError, Interceptor};
use cms_admin_http::types::LoginRequest;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn user_json() -> serde_json::Value {
    json!({
        "_id": "admin-1",
        "firstName": "Grace",
        "lastName": "Hopper",
        "email": "grace@example.com",
        "role": "admin",
        "isEmailVerified": true,
        "isActive": true
    })
}

#[tokio::test]
async fn test_client_builder() {
    let client = AdminClient::builder()
        .base_url("http://localhost:8080/")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = AdminClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_client_builder_rejects_relative_base_url() {
    let result = AdminClient::builder().base_url("/api").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_email_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login-email"))
        .and(body_json(json!({"email": "grace@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"message": "Welcome back", "admin": user_json(), "token": "tok-1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    let data = client
        .login_email(&LoginRequest {
            email: "grace@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(data.token, "tok-1");
    assert_eq!(data.admin.id, "admin-1");
    assert_eq!(data.message.as_deref(), Some("Welcome back"));
}

#[tokio::test]
async fn test_login_failure_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login-email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    let result = client
        .login_email(&LoginRequest {
            email: "x@example.com".into(),
            password: "nope".into(),
        })
        .await;

    assert!(matches!(result, Err(ClientError::Rejected { message: None })));
}

#[tokio::test]
async fn test_profile_sends_explicit_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", "Bearer stored-token"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": user_json()})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    let user = client.profile("stored-token").await.unwrap();
    assert_eq!(user.email, "grace@example.com");
}

#[tokio::test]
async fn test_logout_ignores_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .and(header("authorization", "Bearer bye"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    assert!(client.logout("bye").await.is_ok());
}

#[tokio::test]
async fn test_request_attaches_current_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/blogs"))
        .and(header("authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    client.install_interceptor(Interceptor::new(|| Some("live-token".into()), |_| {}));

    let request = client.request(reqwest::Method::GET, "/api/blogs");
    let blogs: Vec<serde_json::Value> = client.execute(request).await.unwrap();
    assert!(blogs.is_empty());
}

#[tokio::test]
async fn test_request_without_token_has_no_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/faqs"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/faqs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    client.install_interceptor(Interceptor::new(|| None, |_| {}));

    let request = client.request(reqwest::Method::GET, "/api/faqs");
    let faqs: Vec<serde_json::Value> = client.execute(request).await.unwrap();
    assert!(faqs.is_empty());
}

#[tokio::test]
async fn test_token_rotation_is_honored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(|request: &Request| {
            let auth = request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            ResponseTemplate::new(200).set_body_json(json!({"auth": auth}))
        })
        .mount(&mock_server)
        .await;

    let token = Rc::new(RefCell::new(Some("first".to_string())));
    let client = AdminClient::new(mock_server.uri()).unwrap();
    {
        let token = token.clone();
        client.install_interceptor(Interceptor::new(move || token.borrow().clone(), |_| {}));
    }

    let first: serde_json::Value = client
        .execute(client.request(reqwest::Method::GET, "/api/jobs"))
        .await
        .unwrap();
    *token.borrow_mut() = Some("second".to_string());
    let second: serde_json::Value = client
        .execute(client.request(reqwest::Method::GET, "/api/jobs"))
        .await
        .unwrap();

    assert_eq!(first["auth"], "Bearer first");
    assert_eq!(second["auth"], "Bearer second");
}

#[tokio::test]
async fn test_unauthorized_on_auth_path_fires_hook_before_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})),
        )
        .mount(&mock_server)
        .await;

    let fired = Rc::new(RefCell::new(Vec::new()));
    let client = AdminClient::new(mock_server.uri()).unwrap();
    {
        let fired = fired.clone();
        client.install_interceptor(Interceptor::new(
            || None,
            move |path| fired.borrow_mut().push(path.to_string()),
        ));
    }

    let result = client.profile("stale").await;

    assert_eq!(*fired.borrow(), vec!["/api/auth/profile".to_string()]);
    let error = result.unwrap_err();
    assert!(error.is_unauthorized());
    assert_eq!(error.server_message(), Some("Token expired"));
}

#[tokio::test]
async fn test_unauthorized_on_feature_path_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/gallery/42"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let fired = Rc::new(Cell::new(0));
    let client = AdminClient::new(mock_server.uri()).unwrap();
    {
        let fired = fired.clone();
        client.install_interceptor(Interceptor::new(
            || Some("tok".into()),
            move |_| fired.set(fired.get() + 1),
        ));
    }

    let result = client
        .execute_discarding(client.request(reqwest::Method::DELETE, "/api/gallery/42"))
        .await;

    assert!(result.unwrap_err().is_unauthorized());
    assert_eq!(fired.get(), 0);
}

#[tokio::test]
async fn test_reinstalling_interceptor_does_not_stack() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let client = AdminClient::new(mock_server.uri()).unwrap();
    {
        let first = first.clone();
        client.install_interceptor(Interceptor::new(|| None, move |_| first.set(first.get() + 1)));
    }
    {
        let second = second.clone();
        client
            .clone()
            .install_interceptor(Interceptor::new(|| None, move |_| second.set(second.get() + 1)));
    }

    let _ = client.logout("tok").await;

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[tokio::test]
async fn test_other_errors_pass_through_unmodified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let fired = Rc::new(Cell::new(false));
    let client = AdminClient::new(mock_server.uri()).unwrap();
    {
        let fired = fired.clone();
        client.install_interceptor(Interceptor::new(|| None, move |_| fired.set(true)));
    }

    let error = client.profile("tok").await.unwrap_err();
    assert_eq!(error.status(), Some(503));
    assert_eq!(error.server_message(), Some("maintenance"));
    assert!(!fired.get());
}
