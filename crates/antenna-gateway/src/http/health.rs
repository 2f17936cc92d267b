use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// GET /ping: liveness probe, plain-text `pong`.
pub fn pong() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], "pong").into_response()
}
