//! Webhook ingress. Every method on every path lands here.
//!
//! The request path is looked up in the [`DispatchTable`] before the body is
//! read, so unknown paths answer 404 whatever their size. Service bodies are
//! buffered up to `MAX_BODY_BYTES`. Secured services go through the content
//! guard and signature check, then the raw body is handed to the scheduler as
//! the payload.

use std::collections::HashMap;
use std::sync::Arc;

use antenna_core::{config::MAX_BODY_BYTES, AntennaConfig, ServiceConfig};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::app::AppState;
use crate::http::{guard, health, signature};

/// What a registered path resolves to.
#[derive(Debug, Clone)]
pub enum Route {
    /// Built-in `/ping` health probe.
    Ping,
    /// A configured service.
    Service {
        name: String,
        service: Arc<ServiceConfig>,
    },
}

impl Route {
    fn label(&self) -> &str {
        match self {
            Route::Ping => "ping",
            Route::Service { name, .. } => name.as_str(),
        }
    }
}

/// Path → route table, built once at startup.
#[derive(Debug, Default)]
pub struct DispatchTable {
    routes: HashMap<String, Route>,
}

impl DispatchTable {
    /// Register `/ping` (when allowed) and then every service in name order.
    /// A service whose path is already taken replaces the earlier binding.
    pub fn new(config: &AntennaConfig) -> Self {
        info!("Configuring router...");
        let mut routes = HashMap::new();

        if config.server.allow_ping {
            routes.insert("/ping".to_string(), Route::Ping);
        }

        for (name, service) in &config.services {
            info!(" - Adding service {name}");
            if let Some(previous) = routes.get(&service.path) {
                warn!(
                    path = %service.path,
                    "{name} path is overriding {} service path",
                    previous.label()
                );
            }
            routes.insert(
                service.path.clone(),
                Route::Service {
                    name: name.clone(),
                    service: Arc::new(service.clone()),
                },
            );
        }

        Self { routes }
    }

    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.get(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// ── Public handler ────────────────────────────────────────────────────────────

/// Fallback handler for all requests.
///
/// 404 with an empty body for unknown paths, `pong` for `/ping`, otherwise
/// the service pipeline.
pub async fn route(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Response {
    match state.routes.get(uri.path()) {
        None => StatusCode::NOT_FOUND.into_response(),
        Some(Route::Ping) => health::pong(),
        Some(Route::Service { name, service }) => {
            let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
                Ok(body) => body,
                Err(e) => {
                    error!(service = %name, error = %e, "could not read request body");
                    return StatusCode::PAYLOAD_TOO_LARGE.into_response();
                }
            };
            handle_service(&state, name, Arc::clone(service), &method, &headers, &body).await
        }
    }
}

async fn handle_service(
    state: &AppState,
    name: &str,
    service: Arc<ServiceConfig>,
    method: &Method,
    headers: &HeaderMap,
    body: &Bytes,
) -> Response {
    info!(service = %name, bytes = body.len(), "webhook arrived");

    if service.secret.is_some() {
        if !guard::is_json_post(method, headers) {
            error!(service = %name, method = %method, "rejected non-JSON or non-POST request");
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Please use a POST request with json body/header",
            )
                .into_response();
        }

        if !signature::verify(headers, body, name, &service) {
            return reply(
                StatusCode::UNAUTHORIZED,
                json!({"status": "error", "message": "invalid/missing signature"}),
            );
        }
    }

    let payload = String::from_utf8_lossy(body).into_owned();

    match state.scheduler.schedule(name, service, payload).await {
        Ok(Some(data)) => reply(
            StatusCode::OK,
            json!({"status": "ok", "message": "task successfuly executed", "data": data}),
        ),
        Ok(None) => reply(
            StatusCode::OK,
            json!({"status": "ok", "message": "task scheduled (or already scheduled)"}),
        ),
        Err(e) => {
            error!(service = %name, error = %e, "Got server error");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"status": "error", "message": "Server Error"}),
            )
        }
    }
}

/// JSON body with `content-type: application/json`.
fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}
