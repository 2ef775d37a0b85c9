use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Session;
use crate::services::providers::RecommendationProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The single recommendation session, guarded for concurrent handlers
    pub inner: Arc<RwLock<Session>>,
    pub provider: Arc<dyn RecommendationProvider>,
}

impl AppState {
    /// Creates a fresh session backed by the given provider
    pub fn new(provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Session::new())),
            provider,
        }
    }
}
