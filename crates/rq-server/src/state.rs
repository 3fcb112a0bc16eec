//! Application state shared across all handlers.

use crate::generate::TextGenerator;
use rq_core::ReqsmithConfig;
use rq_extract::FileTextExtractor;
use rq_session::{spawn_sweeper, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub extractor: Arc<FileTextExtractor>,
    pub generator: Arc<dyn TextGenerator>,
    pub config: ReqsmithConfig,
}

impl AppState {
    pub fn new(
        config: ReqsmithConfig,
        extractor: Arc<FileTextExtractor>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            store: Arc::new(SessionStore::new(config.session.ttl_minutes)),
            extractor,
            generator,
            config,
        }
    }

    /// Start the periodic expiry sweeper at the configured interval.
    /// Optional; manual `SessionStore::sweep` keeps working either way.
    pub fn start_sweeper(&self) -> JoinHandle<()> {
        spawn_sweeper(
            Arc::clone(&self.store),
            Duration::from_secs(self.config.session.sweep_interval_secs),
        )
    }
}
