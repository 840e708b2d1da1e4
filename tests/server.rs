use axum::{
    body::Body,
    http::{header::LOCATION, Request, StatusCode},
};
use axum::async_trait;
use orcid_logout_bridge::{
    attach,
    server::{router, AppState},
    BridgeConfig, BridgeError, ControlRegistry, JsonFetcher, MemoryLog, Payload, ReqwestFetcher,
    DEFAULT_CONTROL_ID,
};
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(logout_url: &str) -> BridgeConfig {
    BridgeConfig {
        logout_url: logout_url.to_string(),
        control_id: DEFAULT_CONTROL_ID.to_string(),
        bind_addr: ([127, 0, 0, 1], 0).into(),
    }
}

/// Reports each finished provider round trip. The bridge logs right after
/// the fetch returns, without yielding, so on the single threaded test
/// runtime a received signal means the log is final.
struct SignallingFetcher {
    inner: ReqwestFetcher,
    done: mpsc::UnboundedSender<()>,
}

#[async_trait]
impl JsonFetcher for SignallingFetcher {
    async fn get_json(&self, url: &str) -> Result<Payload, BridgeError> {
        let result = self.inner.get_json(url).await;
        let _ = self.done.send(());
        result
    }
}

fn app(config: BridgeConfig) -> (axum::Router, MemoryLog, mpsc::UnboundedReceiver<()>) {
    let controls = ControlRegistry::with_controls([config.control_id.clone()]);
    let log = MemoryLog::new();
    let (done, finished) = mpsc::unbounded_channel();
    attach(
        &controls,
        &config.control_id,
        &config.logout_url,
        SignallingFetcher {
            inner: ReqwestFetcher::default(),
            done,
        },
        log.clone(),
    );
    (router(AppState { controls, config }), log, finished)
}

async fn settle(finished: &mut mpsc::UnboundedReceiver<()>) {
    tokio::time::timeout(Duration::from_secs(5), finished.recv())
        .await
        .expect("provider request never finished");
}

#[tokio::test]
async fn home_renders_the_logout_control() {
    let (app, _, _) = app(config("https://orcid.org/userStatus.json?logUserOut=true"));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"id="orcid-and-drupal-logout""#));
    assert!(html.contains("signs you out of orcid.org"));
}

#[tokio::test]
async fn logout_redirects_even_when_the_provider_is_down() {
    let (app, log, mut finished) = app(config("http://127.0.0.1:1/userStatus.json"));

    let response = app
        .oneshot(Request::builder().uri("/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");

    settle(&mut finished).await;
    assert!(log.lines().is_empty());
}

#[tokio::test]
async fn logout_notifies_the_provider() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "loggedIn": false })))
        .expect(1)
        .mount(&provider)
        .await;

    let (app, log, mut finished) = app(config(&provider.uri()));
    let response = app
        .oneshot(Request::builder().uri("/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    settle(&mut finished).await;

    assert_eq!(
        log.lines(),
        vec![
            "loggedIn -- false",
            "Attempted to log out of ORCID. Still Logged In: false",
        ]
    );
}
