//! Index page source.

use std::fs;
use std::sync::Arc;

use crate::config::AssetsConfig;

/// Page served when no `assets.index_path` is configured.
pub const BUILTIN_INDEX: &str = include_str!("../../assets/index.html");

/// Read the configured index page once at startup.
///
/// An unreadable file is logged and replaced by the built-in page.
pub fn load_index(config: &AssetsConfig) -> Arc<str> {
    let Some(path) = &config.index_path else {
        return Arc::from(BUILTIN_INDEX);
    };

    match fs::read_to_string(path) {
        Ok(html) => {
            tracing::info!(path = %path.display(), "Loaded index page");
            Arc::from(html)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read index page, using built-in");
            Arc::from(BUILTIN_INDEX)
        }
    }
}
