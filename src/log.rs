use std::sync::{Arc, PoisonError, RwLock};

pub const CONSOLE_TARGET: &str = "orcid_logout_bridge::console";

/// Sink for the human readable lines the bridge produces.
pub trait DiagnosticLog: Send + Sync + 'static {
    fn line(&self, line: &str);
}

/// Writes every line to the process wide `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl DiagnosticLog for TracingLog {
    fn line(&self, line: &str) {
        tracing::info!(target: CONSOLE_TARGET, "{}", line);
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryLog {
    lines: Arc<RwLock<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticLog for MemoryLog {
    fn line(&self, line: &str) {
        self.lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
    }
}
