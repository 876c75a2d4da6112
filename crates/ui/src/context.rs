use std::sync::Arc;

use services::{Clock, StudyDesk};
use storage::local::LocalStore;

pub trait UiApp: Send + Sync {
    fn local_store(&self) -> Arc<dyn LocalStore>;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    store: Arc<dyn LocalStore>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            store: app.local_store(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Load a fresh desk from the configured store.
    #[must_use]
    pub fn load_desk(&self) -> StudyDesk {
        StudyDesk::load(Arc::clone(&self.store), self.clock)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
