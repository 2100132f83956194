//! Cross-origin policy: an explicit allow-list plus, optionally, any
//! plain-http origin on loopback or a private IPv4 range.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use regex::Regex;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

static PRIVATE_NETWORK_ORIGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^http://(localhost|127\.0\.0\.1|10\.\d{1,3}\.\d{1,3}\.\d{1,3}|192\.168\.\d{1,3}\.\d{1,3}|172\.(1[6-9]|2\d|3[01])\.\d{1,3}\.\d{1,3}):\d{1,5}$",
    )
    .expect("private network origin pattern is valid")
});

/// Decides whether a request `Origin` may receive CORS headers.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    exact: Vec<String>,
    allow_private_network: bool,
}

impl OriginPolicy {
    pub fn new(origins: &[String], allow_private_network: bool) -> Self {
        Self {
            exact: origins.iter().map(|o| normalize_origin(o)).collect(),
            allow_private_network,
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        if self.exact.iter().any(|o| *o == origin) {
            return true;
        }
        self.allow_private_network && PRIVATE_NETWORK_ORIGIN.is_match(&origin)
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_ascii_lowercase()
}

/// Build the CORS middleware layer from configuration.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let policy = Arc::new(OriginPolicy::new(
        &config.origins,
        config.allow_private_network,
    ));

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts| {
                origin
                    .to_str()
                    .map(|o| policy.allows(o))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            ACCEPT,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
