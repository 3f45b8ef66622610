//! Cross-origin policy: a fixed allow-list of front-end origins, with
//! credentials.

use axum::http::{HeaderValue, Method, header};
use fauna_core::{DEFAULT_CORS_ORIGINS, env_list};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Comma separated override for the allowed origins.
pub const CORS_ORIGINS_VAR: &str = "FAUNA_CORS_ORIGINS";

#[must_use]
pub fn cors_origins_from_env() -> Vec<String> {
    env_list(CORS_ORIGINS_VAR, &DEFAULT_CORS_ORIGINS)
}

/// Browsers send `Origin` without a trailing slash, so configured values are
/// normalized before matching. Unparseable entries are dropped with a warning.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .map(|o| o.trim().trim_end_matches('/'))
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(origin = o, error = %e, "ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
