use super::HtmlTemplate;
use crate::BridgeConfig;
use askama::Template;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;
use url::Url;

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    control_id: String,
    logout_url: String,
    provider: Option<String>,
}

#[instrument(skip(config))]
pub async fn home(State(config): State<BridgeConfig>) -> impl IntoResponse {
    // The URL is never validated; a bad one only loses the provider name.
    let provider = Url::parse(&config.logout_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned));

    HtmlTemplate(HomeTemplate {
        control_id: config.control_id,
        logout_url: config.logout_url,
        provider,
    })
}
