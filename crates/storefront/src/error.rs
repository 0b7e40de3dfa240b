//! Unified error handling.
//!
//! Per-action failures (a rejected form, a failed cart post) are not
//! errors at this level - they surface as notifications and the app
//! returns to idle. `StorefrontError` covers what genuinely prevents the
//! storefront from running: bad config, an unconstructible HTTP client, or
//! an unreadable session store.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::SessionStoreError;

/// Errors that prevent the storefront from starting or persisting state.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The API client could not be set up.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The persisted session could not be read or written.
    #[error("Session store error: {0}")]
    Session(#[from] SessionStoreError),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
