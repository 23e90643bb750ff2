//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::NotificationHub;
use crate::service::StudentService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Student service for all business logic.
    pub student_service: Arc<StudentService>,
    /// Listener registry for WebSocket connections.
    pub hub: NotificationHub,
}

impl AppState {
    /// Bundles the service and the hub it broadcasts through.
    #[must_use]
    pub fn new(student_service: Arc<StudentService>, hub: NotificationHub) -> Self {
        Self {
            student_service,
            hub,
        }
    }
}
