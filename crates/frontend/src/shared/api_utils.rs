//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs from the loaded
//! [`Config`](crate::shared::config::Config).

use crate::shared::config::Config;

/// Get the base URL for API requests
///
/// Uses `api.origin` when configured, otherwise the current window location
/// with `api.port`.
///
/// # Returns
/// - API base URL like "http://localhost:8080" or "https://farm.example.com"
/// - Empty string if window is not available and no origin is configured
pub fn api_base(config: &Config) -> String {
    let origin = config.api.origin.trim();
    if !origin.is_empty() {
        return origin.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config.api.port)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `base` - result of [`api_base`]
/// * `path` - The API path (should start with "/api/")
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base, path)
}

/// Natural keys are user-typed; encode them before they become a path segment
pub fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_origin_wins() {
        let mut config = Config::default();
        config.api.origin = "https://farm.example.com/".into();
        assert_eq!(api_base(&config), "https://farm.example.com");
    }

    #[test]
    fn test_api_url_and_key_encoding() {
        assert_eq!(
            api_url("http://localhost:8080", "/api/v1/crop/all"),
            "http://localhost:8080/api/v1/crop/all"
        );
        assert_eq!(encode_key("C 01/a"), "C%2001%2Fa");
    }
}
