//! CORS configuration
//!
//! Workspaces are served from per-tenant subdomains, so the browser calls
//! the API cross-origin and cookies must survive the trip. Development is
//! permissive; production restricts origins to the configured list, where
//! a `*.example.com` entry matches every workspace subdomain.
//!
//! # Environment Variables
//! - `ENVIRONMENT`: set to "production" for the restrictive policy
//! - `ALLOWED_ORIGINS`: comma-separated origin list; entries may carry a
//!   `*.` subdomain wildcard
//! - `CORS_MAX_AGE`: preflight cache lifetime in seconds (default 3600)

use std::env;

use actix_cors::Cors;
use actix_web::http::{header, Method};

pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .unwrap_or_else(|_| "3600".to_string())
        .parse::<usize>()
        .unwrap_or(3600);

    if environment == "production" {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn allowed_headers() -> Vec<header::HeaderName> {
    vec![
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
        header::CONTENT_TYPE,
        header::ORIGIN,
        header::HeaderName::from_static("x-workspace-url"),
        header::HeaderName::from_static("x-requested-with"),
    ]
}

fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allowed_origin_fn(|_origin, _req_head| true)
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(allowed_headers())
        .expose_headers(vec![header::HeaderName::from_static("retry-after")])
        .max_age(max_age)
        .supports_credentials()
}

fn create_production_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let patterns: Vec<String> = env::var("ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if patterns.is_empty() {
        log::warn!("ALLOWED_ORIGINS is empty; browsers will be unable to call the API");
    }

    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            origin
                .to_str()
                .map(|origin| origin_matches_any(origin, &patterns))
                .unwrap_or(false)
        })
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(allowed_headers())
        .expose_headers(vec![header::HeaderName::from_static("retry-after")])
        .max_age(max_age)
        .supports_credentials()
}

/// Check an origin against the configured patterns.
///
/// `https://*.teamspace.com` matches any single-level workspace subdomain;
/// exact entries match verbatim.
fn origin_matches_any(origin: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if let Some((prefix, suffix)) = split_wildcard_pattern(pattern) {
            // The part the wildcard covers must be one non-empty label
            origin
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(&suffix))
                .map(|label| !label.is_empty() && !label.contains('.'))
                .unwrap_or(false)
        } else {
            pattern == origin
        }
    })
}

/// For `https://*.teamspace.com`, returns `("https://", ".teamspace.com")`
fn split_wildcard_pattern(pattern: &str) -> Option<(String, String)> {
    let (scheme, rest) = pattern.split_once("://")?;
    let host = rest.strip_prefix("*.")?;
    Some((format!("{}://", scheme), format!(".{}", host)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_matches_workspace_subdomain() {
        let patterns = vec!["https://*.teamspace.com".to_string()];
        assert!(origin_matches_any("https://acme.teamspace.com", &patterns));
        assert!(origin_matches_any("https://beta-co.teamspace.com", &patterns));
    }

    #[test]
    fn test_wildcard_rejects_apex_and_nested() {
        let patterns = vec!["https://*.teamspace.com".to_string()];
        assert!(!origin_matches_any("https://teamspace.com", &patterns));
        assert!(!origin_matches_any("https://a.b.teamspace.com", &patterns));
        assert!(!origin_matches_any("https://evil-teamspace.com", &patterns));
        assert!(!origin_matches_any("http://acme.teamspace.com", &patterns));
    }

    #[test]
    fn test_exact_origin_matches() {
        let patterns = vec!["https://app.teamspace.com".to_string()];
        assert!(origin_matches_any("https://app.teamspace.com", &patterns));
        assert!(!origin_matches_any("https://other.teamspace.com", &patterns));
    }
}
