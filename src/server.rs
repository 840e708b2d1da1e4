use crate::{
    activation::ControlRegistry, bridge::LogoutBridge, fetch::ReqwestFetcher, handler,
    log::TracingLog, BridgeConfig,
};
use axum::{
    extract::FromRef,
    http::Request,
    response::Response,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::Span;

pub async fn start_server(config: BridgeConfig) -> anyhow::Result<()> {
    // The rendered page carries exactly one logout control.
    let controls = ControlRegistry::with_controls([config.control_id.clone()]);

    let bridge = LogoutBridge::new(
        config.logout_url.clone(),
        ReqwestFetcher::new(reqwest::Client::new()),
        TracingLog,
    );
    if !bridge.attach(&controls, &config.control_id) {
        tracing::warn!("logout control {} not rendered", config.control_id);
    }
    tracing::debug!(
        "{} listener(s) on {}",
        controls.listener_count(&config.control_id),
        config.control_id
    );

    let addr = config.bind_addr;
    let app = router(AppState { controls, config });

    // run it
    tracing::debug!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::home))
        .route("/logout", get(handler::logout))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<_>, _span: &Span| {
                    tracing::info!("{} {}", request.method(), request.uri());
                })
                .on_response(|response: &Response, latency: Duration, _span: &Span| {
                    tracing::info!("{} {:?}", response.status(), latency);
                }),
        )
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub controls: ControlRegistry,
    pub config: BridgeConfig,
}

impl FromRef<AppState> for ControlRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.controls.clone()
    }
}

impl FromRef<AppState> for BridgeConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
