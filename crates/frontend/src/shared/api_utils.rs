//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests.
///
/// The app is served by the same process that answers `/api/*`, so the base
/// is the current window origin. Empty string if window is not available
/// (relative URLs still work in that case).
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path (should start with "/api/").
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
