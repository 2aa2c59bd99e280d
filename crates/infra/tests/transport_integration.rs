//! Integration tests for the transport client
//!
//! Exercises retry bounds, outcome classification, and the
//! refresh-and-retry cycle against a live wiremock server, with the real
//! token lifecycle manager and auth endpoint client in the loop.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use finboard_common::auth::{TokenLifecycleManager, TokenPair};
use finboard_common::resilience::RetryPolicy;
use finboard_common::testing::MemoryCredentialPersistence;
use finboard_domain::FinboardError;
use finboard_infra::http::{ManagedTokenSource, RequestDescriptor, TransportClient};
use finboard_infra::testing::StaticTokenSource;
use finboard_infra::AuthApiClient;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Manager = TokenLifecycleManager<AuthApiClient, MemoryCredentialPersistence>;

fn transport_with(auth: Arc<StaticTokenSource>, attempts: u32) -> TransportClient {
    TransportClient::builder()
        .retry_policy(RetryPolicy::new(attempts, Duration::from_millis(10), Duration::from_millis(50)))
        .build(auth)
        .expect("transport client")
}

async fn managed_transport(server: &MockServer) -> (TransportClient, Arc<Manager>) {
    let auth_client =
        AuthApiClient::new(server.uri(), Duration::from_secs(5)).expect("auth client");
    let manager = Arc::new(TokenLifecycleManager::new(
        Arc::new(auth_client),
        Arc::new(MemoryCredentialPersistence::new()),
        30,
    ));
    manager
        .login(TokenPair::new("stale", "refresh-0", 3600), None)
        .await
        .expect("login");

    let transport = TransportClient::builder()
        .retry_policy(RetryPolicy::new(2, Duration::from_millis(10), Duration::from_millis(50)))
        .build(Arc::new(ManagedTokenSource::new(Arc::clone(&manager))))
        .expect("transport client");
    (transport, manager)
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener); // release the port so requests fail with ECONNREFUSED
    format!("http://{addr}")
}

#[tokio::test]
async fn returns_successful_response_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    let body: serde_json::Value =
        transport.send_json(&RequestDescriptor::get(server.uri())).await.expect("response");
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn attaches_bearer_token_to_authenticated_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    transport.send(&RequestDescriptor::get(server.uri())).await.expect("response");
}

#[tokio::test]
async fn public_requests_carry_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    transport.send(&RequestDescriptor::get(server.uri()).public()).await.expect("response");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn retries_server_errors_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    transport.send(&RequestDescriptor::get(server.uri())).await.expect("response");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

/// An endpoint that always answers 503 is attempted exactly `max_attempts`
/// times before the exhaustion surfaces.
#[tokio::test]
async fn persistent_server_errors_exhaust_the_attempt_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    let outcome = transport.send(&RequestDescriptor::get(server.uri())).await;

    assert!(matches!(outcome, Err(FinboardError::Server { status: 503, .. })));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(422).set_body_string("validation failed"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    let outcome = transport.send(&RequestDescriptor::get(server.uri())).await;
    assert!(matches!(outcome, Err(FinboardError::Client { status: 422, .. })));
}

#[tokio::test]
async fn missing_resources_surface_as_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("co-9999"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    let outcome = transport.send(&RequestDescriptor::get(server.uri())).await;
    assert_eq!(outcome.err(), Some(FinboardError::NotFound("co-9999".into())));
}

#[tokio::test]
async fn unreachable_hosts_fail_with_network_error_after_retries() {
    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 2);
    let outcome = transport.send(&RequestDescriptor::get(closed_port_url())).await;
    assert!(matches!(outcome, Err(FinboardError::Network(_))));
}

/// A per-attempt timeout classifies as retryable: the slow endpoint is hit
/// once per configured attempt before the network error surfaces.
#[tokio::test]
async fn timeouts_are_retried_like_network_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .expect(2)
        .mount(&server)
        .await;

    let transport = TransportClient::builder()
        .timeout(Duration::from_millis(50))
        .retry_policy(RetryPolicy::new(2, Duration::from_millis(10), Duration::from_millis(20)))
        .build(Arc::new(StaticTokenSource::new("token")))
        .expect("transport client");

    let outcome = transport.send(&RequestDescriptor::get(server.uri())).await;
    assert!(matches!(outcome, Err(FinboardError::Network(_))));
}

#[tokio::test]
async fn probes_run_once_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_with(Arc::new(StaticTokenSource::new("token")), 3);
    let outcome = transport.probe(&format!("{}/health", server.uri())).await;

    // Single attempt: a failing probe is reported, not retried.
    assert!(matches!(outcome, Err(FinboardError::Server { status: 503, .. })));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

/// 401 → one refresh → the original request is retried once with the
/// renewed token.
#[tokio::test]
async fn expired_credentials_trigger_one_refresh_and_one_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/companies"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/companies"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "refresh_token": "refresh-1",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, manager) = managed_transport(&server).await;
    let body: Vec<serde_json::Value> = transport
        .send_json(&RequestDescriptor::get(format!("{}/v1/companies", server.uri())))
        .await
        .expect("renewed request");
    assert!(body.is_empty());

    let tokens = manager.store().tokens().await.expect("session still present");
    assert_eq!(tokens.access_token, "fresh");
    server.verify().await;
}

/// N concurrent requests racing into 401 share one refresh call.
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_auth_expiry_shares_a_single_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/companies"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/companies"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({
                    "access_token": "fresh",
                    "refresh_token": "refresh-1",
                    "expires_in": 3600
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (transport, _manager) = managed_transport(&server).await;
    let transport = Arc::new(transport);
    let url = format!("{}/v1/companies", server.uri());

    let mut handles = Vec::new();
    for _ in 0..6 {
        let transport = Arc::clone(&transport);
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            transport.send_json::<Vec<serde_json::Value>>(&RequestDescriptor::get(url)).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("request should succeed after shared renewal");
    }
    server.verify().await;
}

/// A renewed token that is rejected again escalates to `AuthFailure` and
/// tears the session down instead of looping.
#[tokio::test]
async fn second_rejection_after_renewal_ends_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/companies"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "refresh_token": "refresh-1",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, manager) = managed_transport(&server).await;
    let outcome = transport
        .send(&RequestDescriptor::get(format!("{}/v1/companies", server.uri())))
        .await;

    assert!(matches!(outcome, Err(FinboardError::AuthFailure(_))));
    assert!(!manager.store().is_authenticated().await);
    server.verify().await;
}

/// 401 followed by a failing refresh escalates to `AuthFailure` with the
/// credential state cleared; the request is not retried further.
#[tokio::test]
async fn failing_refresh_escalates_to_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/companies"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string("refresh token revoked"))
        .expect(1)
        .mount(&server)
        .await;

    let (transport, manager) = managed_transport(&server).await;
    let outcome = transport
        .send(&RequestDescriptor::get(format!("{}/v1/companies", server.uri())))
        .await;

    assert!(matches!(outcome, Err(FinboardError::AuthFailure(_))));
    assert!(!manager.store().is_authenticated().await);
    server.verify().await;
}

/// Requests without a session fail terminally before any network attempt.
#[tokio::test]
async fn unauthenticated_requests_fail_without_touching_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

    let auth_client =
        AuthApiClient::new(server.uri(), Duration::from_secs(5)).expect("auth client");
    let manager: Arc<Manager> = Arc::new(TokenLifecycleManager::new(
        Arc::new(auth_client),
        Arc::new(MemoryCredentialPersistence::new()),
        30,
    ));
    let transport = TransportClient::builder()
        .build(Arc::new(ManagedTokenSource::new(manager)))
        .expect("transport client");

    let outcome = transport.send(&RequestDescriptor::get(server.uri())).await;
    assert!(matches!(outcome, Err(FinboardError::AuthFailure(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
