use std::sync::Arc;

use crate::agent::ChatRelay;
use crate::mailer::EmailDispatcher;

/// Shared handler state. Both services are immutable, so clones are cheap and
/// requests never contend on anything.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<EmailDispatcher>,
    pub relay: Arc<ChatRelay>,
}

impl AppState {
    pub fn new(dispatcher: EmailDispatcher, relay: ChatRelay) -> Self {
        Self { dispatcher: Arc::new(dispatcher), relay: Arc::new(relay) }
    }
}
