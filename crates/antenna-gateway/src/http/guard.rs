//! Content guard for secured services.

use axum::http::{header::CONTENT_TYPE, HeaderMap, Method};

/// True iff the request declares `content-type: application/json` (exact,
/// no parameters) and its method is POST, compared case-insensitively.
pub fn is_json_post(method: &Method, headers: &HeaderMap) -> bool {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "application/json");

    is_json && method.as_str().eq_ignore_ascii_case("POST")
}
