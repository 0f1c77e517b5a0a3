//! Login followed by authenticated calls against a local mock server.

use glesys_core::config::ClientConfig;
use glesys_login::{LoginClient, UserService};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{basic_auth, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_then_list_projects() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/login"))
        .and(body_json(json!({
            "username": "alice",
            "password": "hunter2",
            "otp": "123456"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"login": {
                "username": "alice",
                "apikey": "user-key",
                "accounts": [],
                "customers": [{"customernumber": "12345", "roles": ["owner"]}]
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/customer/listprojects"))
        .and(basic_auth("alice", "user-key"))
        .and(body_json(json!({"organizationnumber": "12345"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"projects": [{"accountname": "CL12345", "name": "web"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri())
        .unwrap()
        .with_user_agent("integration-test/1.0");
    let login = LoginClient::from_config(&config).unwrap();

    let details = login
        .users()
        .login("alice", "hunter2", "123456")
        .await
        .unwrap();
    assert_eq!(details.customers[0].customer_number, "12345");

    let users = UserService::new(Arc::new(login.authenticated(&details).unwrap()));
    let projects = users.list_customer_projects("12345").await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].account_name, "CL12345");
}

#[tokio::test]
async fn rejected_login_surfaces_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "response": {"status": {"code": 401, "text": " Invalid username or password "}}
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).unwrap();
    let login = LoginClient::from_config(&config).unwrap();
    let err = login
        .users()
        .login("alice", "wrong", "")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Request failed with HTTP error: 401 (Invalid username or password)"
    );
}
