use std::sync::Arc;

use crate::pathway::controller::PathwayController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the generator and mailer; each submission is independent.
    pub controller: Arc<PathwayController>,
}
