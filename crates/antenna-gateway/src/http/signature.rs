//! GitHub-style HMAC-SHA256 request signatures.
//!
//! A secured service expects `sha256=<lowercase hex>` in its signature
//! header, computed over the raw request body with the service secret.

use antenna_core::ServiceConfig;
use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{error, info};

type HmacSha256 = Hmac<Sha256>;

/// `sha256=` + hex HMAC of `payload` keyed with `secret`.
pub fn sign(secret: &str, payload: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload);
    Some(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}

/// Check the request signature of service `name`.
///
/// Services without a secret always pass. Otherwise the header named by
/// `secret_header` must equal the expected digest exactly, prefix and hex
/// case included. A missing or empty header fails.
pub fn verify(headers: &HeaderMap, payload: &[u8], name: &str, service: &ServiceConfig) -> bool {
    let Some(secret) = service.secret.as_deref() else {
        return true;
    };

    let header = service.secret_header();
    let signature = headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if signature.is_empty() {
        error!(service = %name, header = %header, "missing signature header");
        return false;
    }

    let Some(expected) = sign(secret, payload) else {
        error!(service = %name, "could not initialise HMAC for service secret");
        return false;
    };

    if signature == expected {
        info!(service = %name, "signature verified");
        true
    } else {
        error!(service = %name, "signature mismatch: {signature} !== {expected}");
        false
    }
}
