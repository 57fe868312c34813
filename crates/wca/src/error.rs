//! Error types for the WCA client layer.

/// Errors from the WCA REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum WcaApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("WCA API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Errors from the snapshot store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Fetch failed and no cached copy exists.
    #[error("competition {competition_id} is unavailable: {reason}")]
    Unavailable {
        competition_id: String,
        reason: String,
    },

    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cached snapshot is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
