use std::{
    collections::{HashMap, HashSet},
    fmt,
    future::Future,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock},
};
use tokio::task::JoinHandle;

pub type ActivationFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;
pub type ActivationHandler = Arc<dyn Fn() -> ActivationFuture + Send + Sync>;

/// Lets a component react when a page control is activated.
pub trait ActivationSource {
    /// Registers `handler` on `control_id`. Returns `false`, and drops the
    /// handler, when no such control is rendered.
    fn on_activate(&self, control_id: &str, handler: ActivationHandler) -> bool;
}

#[derive(Default)]
struct Controls {
    rendered: HashSet<String>,
    listeners: HashMap<String, Vec<ActivationHandler>>,
}

/// In-process model of the controls a page renders and their listeners.
#[derive(Clone, Default)]
pub struct ControlRegistry {
    inner: Arc<RwLock<Controls>>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controls<I, S>(control_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let registry = Self::new();
        for id in control_ids {
            registry.render(id);
        }
        registry
    }

    pub fn render(&self, control_id: impl Into<String>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .rendered
            .insert(control_id.into());
    }

    pub fn listener_count(&self, control_id: &str) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .get(control_id)
            .map_or(0, Vec::len)
    }

    /// Fires every listener on `control_id`. Each one runs as its own task;
    /// dropping the returned handles detaches them.
    pub fn activate(&self, control_id: &str) -> Vec<JoinHandle<()>> {
        let handlers = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .get(control_id)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(control_id, listeners = handlers.len(), "control activated");

        handlers
            .into_iter()
            .map(|handler| tokio::spawn(handler()))
            .collect()
    }
}

impl ActivationSource for ControlRegistry {
    fn on_activate(&self, control_id: &str, handler: ActivationHandler) -> bool {
        let mut controls = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !controls.rendered.contains(control_id) {
            tracing::debug!(control_id, "control not rendered, listener dropped");
            return false;
        }
        controls
            .listeners
            .entry(control_id.to_owned())
            .or_default()
            .push(handler);
        true
    }
}

impl fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let controls = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ControlRegistry")
            .field("rendered", &controls.rendered)
            .field(
                "listeners",
                &controls
                    .listeners
                    .iter()
                    .map(|(id, handlers)| (id, handlers.len()))
                    .collect::<HashMap<_, _>>(),
            )
            .finish()
    }
}
