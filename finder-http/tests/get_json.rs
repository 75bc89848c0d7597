use finder_http::{HttpClient, HttpError, RequestOpts};
use serde::Deserialize;
use std::borrow::Cow;
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Echo {
    ok: bool,
}

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&format!("{}/w/api.php", server.uri())).expect("valid base")
}

#[tokio::test]
async fn sends_query_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "parse"))
        .and(query_param("page", "Dune (2021 film)"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let got: Echo = client
        .get_json(
            "",
            RequestOpts {
                query: Some(vec![
                    ("action", Cow::Borrowed("parse")),
                    ("page", Cow::Borrowed("Dune (2021 film)")),
                ]),
            },
        )
        .await
        .expect("request succeeds");
    assert!(got.ok);
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({"message": "maintenance"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get_json::<Echo>("", RequestOpts::default())
        .await
        .expect_err("503 must fail");
    match err {
        HttpError::Api {
            status, message, ..
        } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_shape_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .get_json::<Echo>("", RequestOpts::default())
        .await
        .expect_err("body is not JSON");
    assert!(matches!(err, HttpError::Decode(_, ref snippet) if snippet == "not json"));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Port 9 (discard) on localhost is not served by the mock.
    let client = HttpClient::new("http://127.0.0.1:9/w/api.php").unwrap();
    let err = client
        .get_json::<Echo>("", RequestOpts::default())
        .await
        .expect_err("nothing listens there");
    assert!(matches!(err, HttpError::Network(_)));
}

#[tokio::test]
async fn client_timeout_bounds_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).with_timeout(Duration::from_millis(100));
    let err = client
        .get_json::<Echo>("", RequestOpts::default())
        .await
        .expect_err("response arrives after the timeout");
    assert!(matches!(err, HttpError::Network(_)), "got {err:?}");
}
