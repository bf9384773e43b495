use std::cell::Cell;
use std::sync::OnceLock;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use transip_api::{ApiClient, ApiError, RejectionKind, RequestOutcome};
use transip_config::TokenPolicy;

fn test_key_pem() -> &'static str {
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};
    use rsa::RsaPrivateKey;

    static PEM: OnceLock<String> = OnceLock::new();
    PEM.get_or_init(|| {
        let key = RsaPrivateKey::new(&mut rand::rngs::OsRng, 2048).unwrap();
        key.to_pkcs8_pem(LineEnding::LF).unwrap().to_string()
    })
}

fn client_for(server: &ServerGuard, read_only: bool) -> ApiClient {
    let mut policy = TokenPolicy::default();
    policy.set_read_only(read_only);
    ApiClient::builder()
        .base_url(server.url())
        .login("demo-user")
        .private_key(test_key_pem())
        .policy(policy)
        .build()
        .unwrap()
}

fn mock_auth(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/auth")
        .with_status(201)
        .with_body(r#"{"token":"test-bearer-token"}"#)
        .create()
}

#[test]
fn auth_request_carries_signature_and_content_type() {
    let mut server = Server::new();
    let auth = server
        .mock("POST", "/auth")
        .match_header("content-type", "application/json")
        .match_header(
            "signature",
            Matcher::Regex(r"^[A-Za-z0-9+/]+={0,2}$".to_string()),
        )
        .match_body(Matcher::Regex(
            r#"^\{"login":"demo-user","nonce":"[^"]+","read_only":true,"expiration_time":"30 minutes","label":"scanner_token","global_key":false\}$"#.to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"token":"test-bearer-token"}"#)
        .create();

    let client = client_for(&server, true);
    let token = client.authenticate().unwrap();

    assert_eq!(token, "test-bearer-token");
    auth.assert();
}

#[test]
fn token_is_acquired_lazily_and_cached() {
    let mut server = Server::new();
    let auth = server
        .mock("POST", "/auth")
        .with_status(201)
        .with_body(r#"{"token":"test-bearer-token"}"#)
        .expect(1)
        .create();
    let ping = server
        .mock("GET", "/api-test")
        .match_header("authorization", "Bearer test-bearer-token")
        .with_status(200)
        .with_body(r#"{"ping":"pong"}"#)
        .expect(2)
        .create();

    let client = client_for(&server, true);
    for _ in 0..2 {
        let outcome = client
            .get("/api-test", |data| {
                Ok::<bool, serde_json::Error>(data["ping"] == "pong")
            })
            .unwrap();
        match outcome {
            RequestOutcome::Success(true) => {}
            other => panic!("expected Success(true), got {other:?}"),
        }
    }

    auth.assert();
    ping.assert();
}

#[test]
fn auth_rejection_is_fatal_for_the_attempt() {
    let mut server = Server::new();
    server
        .mock("POST", "/auth")
        .with_status(401)
        .with_body("signature does not match")
        .create();

    let client = client_for(&server, true);
    let result = client.get("/api-test", |_| Ok::<(), serde_json::Error>(()));

    match result {
        Err(ApiError::Authentication { status: 401, body }) => {
            assert_eq!(body, "signature does not match");
        }
        other => panic!("expected Authentication error, got {:?}", other.err()),
    }
}

#[test]
fn get_maps_client_rejections_without_invoking_mapper() {
    let cases = [
        (403, RejectionKind::Restricted),
        (404, RejectionKind::NotFound),
        (406, RejectionKind::NotValid),
        (409, RejectionKind::NotEditable),
    ];

    for (status, expected_kind) in cases {
        let mut server = Server::new();
        mock_auth(&mut server);
        server
            .mock("GET", "/domains/example.com")
            .with_status(status)
            .with_body("rejected")
            .create();

        let client = client_for(&server, true);
        let mapper_called = Cell::new(false);
        let outcome = client
            .get("/domains/example.com", |_| {
                mapper_called.set(true);
                Ok::<(), serde_json::Error>(())
            })
            .unwrap();

        assert!(!mapper_called.get(), "mapper must not run on {status}");
        match outcome {
            RequestOutcome::ClientRejected {
                kind,
                status: got,
                body,
            } => {
                assert_eq!(kind, expected_kind);
                assert_eq!(got, status as u16);
                assert_eq!(body, "rejected");
            }
            other => panic!("expected ClientRejected for {status}, got {other:?}"),
        }
    }
}

#[test]
fn get_maps_server_failures() {
    let mut server = Server::new();
    mock_auth(&mut server);
    server
        .mock("GET", "/domains")
        .with_status(503)
        .with_body("maintenance")
        .create();

    let client = client_for(&server, true);
    let outcome = client
        .get("/domains", |_| Ok::<(), serde_json::Error>(()))
        .unwrap();

    match outcome {
        RequestOutcome::ServerFailure { status: 503, body } => assert_eq!(body, "maintenance"),
        other => panic!("expected ServerFailure, got {other:?}"),
    }
}

#[test]
fn get_flags_unmapped_statuses() {
    let mut server = Server::new();
    mock_auth(&mut server);
    server.mock("GET", "/domains").with_status(418).create();

    let client = client_for(&server, true);
    let outcome = client
        .get("/domains", |_| Ok::<(), serde_json::Error>(()))
        .unwrap();

    match outcome {
        RequestOutcome::UnexpectedStatus(418) => {}
        other => panic!("expected UnexpectedStatus(418), got {other:?}"),
    }
}

#[test]
fn mapper_failure_propagates() {
    let mut server = Server::new();
    mock_auth(&mut server);
    server
        .mock("GET", "/domains")
        .with_status(200)
        .with_body(r#"{"domains":[]}"#)
        .create();

    let client = client_for(&server, true);
    let result = client.get("/domains", |data| {
        serde_json::from_value::<Vec<String>>(data["nope"].clone())
    });

    match result {
        Err(ApiError::Mapping(_)) => {}
        other => panic!("expected Mapping error, got {:?}", other.err()),
    }
}

#[test]
fn read_only_policy_blocks_post_before_any_network_call() {
    let mut server = Server::new();
    // No /auth mock mounted: any network activity would fail loudly.
    let any_post = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let client = client_for(&server, true);
    let outcome = client.post("/domains", &json!({"domainName": "example.com"}));

    match outcome.unwrap() {
        RequestOutcome::ReadOnlyBlocked => {}
        other => panic!("expected ReadOnlyBlocked, got {other:?}"),
    }
    any_post.assert();
}

#[test]
fn post_collapses_statuses_into_booleans() {
    let mut server = Server::new();
    mock_auth(&mut server);
    let created = server
        .mock("POST", "/domains")
        .match_header("authorization", "Bearer test-bearer-token")
        .with_status(201)
        .create();
    let conflicted = server.mock("POST", "/dns").with_status(409).create();

    let client = client_for(&server, false);

    match client.post("/domains", &json!({"domainName": "a.com"})).unwrap() {
        RequestOutcome::Success(true) => {}
        other => panic!("expected Success(true), got {other:?}"),
    }
    match client.post("/dns", &json!({})).unwrap() {
        RequestOutcome::Success(false) => {}
        other => panic!("expected Success(false), got {other:?}"),
    }

    created.assert();
    conflicted.assert();
}

#[test]
fn post_maps_server_failures() {
    let mut server = Server::new();
    mock_auth(&mut server);
    server
        .mock("POST", "/domains")
        .with_status(503)
        .with_body("maintenance")
        .create();

    let client = client_for(&server, false);
    match client.post("/domains", &json!({})).unwrap() {
        RequestOutcome::ServerFailure { status: 503, body } => assert_eq!(body, "maintenance"),
        other => panic!("expected ServerFailure, got {other:?}"),
    }
}
