//! Shared application state.

use std::sync::Arc;

use grimoire_engine::application::observation::ObservationLog;
use grimoire_storyteller::{SharedGrimoire, TransportHandle};
use uuid::Uuid;

/// Read handles onto a running session, shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The session being served.
    pub session_id: Uuid,
    /// Read side of the grimoire.
    pub grimoire: SharedGrimoire,
    /// The session's observation log.
    pub log: Arc<ObservationLog>,
    /// Player side of the in-process transport.
    pub transport: TransportHandle,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        session_id: Uuid,
        grimoire: SharedGrimoire,
        log: Arc<ObservationLog>,
        transport: TransportHandle,
    ) -> Self {
        Self {
            session_id,
            grimoire,
            log,
            transport,
        }
    }
}
