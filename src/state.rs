use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::storage::{self, SharedStorage, Storage};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: SharedStorage,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(config: Config, storage: impl Storage + 'static) -> Self {
        let sessions = SessionStore::new(config.auth.session_hours);
        Self {
            config,
            storage: storage::shared(storage),
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }
}
