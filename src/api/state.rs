//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::TokenServiceTrait;

/// Application state shared by all handlers; read-only after startup
#[derive(Clone, Debug)]
pub struct AppState {
    pub token_service: Arc<dyn TokenServiceTrait>,
}

impl AppState {
    pub fn new(token_service: Arc<dyn TokenServiceTrait>) -> Self {
        Self { token_service }
    }
}
