use antenna_core::AntennaConfig;
use antenna_scheduler::Scheduler;
use axum::Router;
use std::sync::Arc;

use crate::http::dispatch::DispatchTable;

/// Central shared state, passed as Arc<AppState> to the dispatch handler.
pub struct AppState {
    /// Path → service bindings, fixed for the process lifetime.
    pub routes: DispatchTable,
    pub scheduler: Scheduler,
}

impl AppState {
    pub fn new(config: &AntennaConfig, scheduler: Scheduler) -> Self {
        Self {
            routes: DispatchTable::new(config),
            scheduler,
        }
    }
}

/// Assemble the Axum router. Routing is done by the dispatch table, so the
/// whole surface is a single fallback handler. The body cap is enforced by
/// that handler once the path is known.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(crate::http::dispatch::route)
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
