use crate::{
    activation::{ActivationFuture, ActivationHandler, ActivationSource},
    fetch::JsonFetcher,
    log::DiagnosticLog,
    payload::Payload,
};
use std::sync::Arc;
use tracing::instrument;

/// Mirrors a host logout onto the identity provider.
///
/// Best effort only: one GET per activation, no retry, no timeout, and
/// failures never leave this type.
#[derive(Debug)]
pub struct LogoutBridge<F, L> {
    logout_url: String,
    fetcher: F,
    log: L,
}

impl<F, L> LogoutBridge<F, L>
where
    F: JsonFetcher,
    L: DiagnosticLog,
{
    pub fn new(logout_url: impl Into<String>, fetcher: F, log: L) -> Self {
        Self {
            logout_url: logout_url.into(),
            fetcher,
            log,
        }
    }

    /// Installs the bridge on `control_id`. Returns whether a listener was
    /// installed; a missing control is not an error.
    pub fn attach<A: ActivationSource>(self, activations: &A, control_id: &str) -> bool {
        let bridge = Arc::new(self);
        let handler: ActivationHandler = Arc::new(move || -> ActivationFuture {
            let bridge = bridge.clone();
            Box::pin(async move { bridge.notify().await })
        });

        activations.on_activate(control_id, handler)
    }

    /// Work done for a single activation.
    #[instrument(skip(self), fields(url = %self.logout_url))]
    pub async fn notify(&self) {
        match self.fetcher.get_json(&self.logout_url).await {
            Ok(payload) => self.report(&payload),
            Err(err) => tracing::debug!("identity provider logout failed: {}", err),
        }
    }

    fn report(&self, payload: &Payload) {
        for (key, value) in payload.iter() {
            self.log.line(&format!("{} -- {}", key, value));
        }
        self.log.line(&format!(
            "Attempted to log out of ORCID. Still Logged In: {}",
            payload.logged_in()
        ));
    }
}

/// Builds a [`LogoutBridge`] and attaches it to `control_id` in one step.
pub fn attach<A, F, L>(
    activations: &A,
    control_id: &str,
    logout_url: &str,
    fetcher: F,
    log: L,
) -> bool
where
    A: ActivationSource,
    F: JsonFetcher,
    L: DiagnosticLog,
{
    LogoutBridge::new(logout_url, fetcher, log).attach(activations, control_id)
}
