use crate::careers::CareerLoader;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Content is re-read on every request, so edits show up without a restart.
    pub loader: CareerLoader,
}
