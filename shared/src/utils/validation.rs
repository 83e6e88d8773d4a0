//! Workspace URL and email validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

/// Workspace subdomain slugs: lowercase alphanumerics and hyphens,
/// 3-63 characters, no leading/trailing hyphen.
static WORKSPACE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]{1,61}[a-z0-9])$").unwrap());

/// Pragmatic email shape check; deliverability is the mail API's problem.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Subdomains that can never be claimed as workspace URLs.
const RESERVED_WORKSPACE_URLS: &[&str] = &[
    "www", "api", "app", "admin", "mail", "status", "support", "docs", "help",
];

/// Check if a workspace URL is a valid, non-reserved subdomain slug
pub fn is_valid_workspace_url(url: &str) -> bool {
    WORKSPACE_URL_RE.is_match(url) && !RESERVED_WORKSPACE_URLS.contains(&url)
}

/// Check if an email address is plausibly valid
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize a workspace URL for storage and lookup
pub fn normalize_workspace_url(url: &str) -> String {
    url.trim().to_lowercase()
}
