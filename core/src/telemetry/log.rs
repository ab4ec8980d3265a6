use log::{debug, info, warn};

/// Component-tagged front for the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.component, message);
    }

    pub fn trace_state(&self, message: &str) {
        debug!("[{}] {}", self.component, message);
    }

    pub fn reject(&self, message: &str) {
        warn!("[{}] rejected: {}", self.component, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("scopecore")
    }
}
