//! Application assembly: store selection, state, router.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::{GatewayConfig, StoreBackend};
use crate::domain::NotificationHub;
use crate::persistence::{MemoryStudentStore, PostgresStudentStore, StoreError, StudentStore};
use crate::service::StudentService;
use crate::ws::handler::ws_handler;

/// Opens the configured store and builds the shared application state.
///
/// # Errors
///
/// Returns [`StoreError`] if the PostgreSQL backend is selected and the
/// store cannot be reached.
pub async fn build_state(config: &GatewayConfig) -> Result<AppState, StoreError> {
    let store: Arc<dyn StudentStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(PostgresStudentStore::connect(&config.database).await?),
        StoreBackend::Memory => {
            tracing::warn!("using in-memory student store; records are lost on exit");
            Arc::new(MemoryStudentStore::new())
        }
    };

    Ok(state_with_store(
        store,
        config.listener_queue_capacity,
        config.expose_store_errors,
    ))
}

/// Builds the application state around an already opened store.
#[must_use]
pub fn state_with_store(
    store: Arc<dyn StudentStore>,
    listener_queue_capacity: usize,
    expose_store_errors: bool,
) -> AppState {
    let hub = NotificationHub::new(listener_queue_capacity);
    let student_service = Arc::new(StudentService::new(store, hub.clone(), expose_store_errors));
    AppState::new(student_service, hub)
}

/// Builds the full router: REST endpoints, WebSocket upgrade on `/` and
/// `/ws`, tracing and CORS layers.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
