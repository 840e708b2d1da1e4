use crate::{activation::ControlRegistry, BridgeConfig};
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

/// Host logout. The identity provider request is dispatched, never awaited.
#[instrument(skip(controls, config))]
pub async fn logout(
    State(controls): State<ControlRegistry>,
    State(config): State<BridgeConfig>,
) -> impl IntoResponse {
    let pending = controls.activate(&config.control_id);
    tracing::debug!("dispatched {} logout listener(s)", pending.len());

    Redirect::to("/")
}
