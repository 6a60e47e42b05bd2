use std::env;

use actix_cors::Cors;
use actix_web::http::{header, Uri};
use tracing::warn;

const DEFAULT_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// Parse `CORS_ALLOWED_ORIGINS` (comma-separated). Entries that are empty,
/// `null`, or not well-formed http(s) origins are dropped with a warning;
/// if nothing survives, the localhost development origins are used.
pub fn allowed_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/'))
        .filter(|s| {
            let ok = is_origin(s);
            if !ok {
                warn!(origin = %s, "Ignoring invalid CORS origin");
            }
            ok
        })
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}

/// Scheme http(s), a host, and nothing past the authority.
fn is_origin(s: &str) -> bool {
    let Ok(uri) = s.parse::<Uri>() else {
        return false;
    };
    let scheme_ok = matches!(uri.scheme_str(), Some("http" | "https"));
    let host_ok = uri.host().is_some_and(|h| !h.is_empty());
    let bare = uri
        .path_and_query()
        .is_none_or(|pq| matches!(pq.as_str(), "" | "/"));
    scheme_ok && host_ok && bare
}

/// Build CORS middleware for the methods and headers the todo API uses.
pub fn cors_middleware() -> Cors {
    let raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in allowed_origins(&raw) {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
