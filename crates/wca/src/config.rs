use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default WCA REST API base URL.
pub const DEFAULT_API_URL: &str = "https://www.worldcubeassociation.org/api/v0";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for everyday use; override via
/// environment variables or a `.env` file.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WCA API base URL, without trailing slash.
    pub api_url: String,
    /// Endpoint listing competitions with live results. `None` disables
    /// live markers.
    pub live_competitions_url: Option<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory for cached WCIF snapshots. `None` disables the disk cache.
    pub cache_dir: Option<PathBuf>,
    /// Directory for user data such as bookmarked competitions.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                 |
    /// |-------------------------|-----------------------------------------|
    /// | `WCA_API_URL`           | `https://www.worldcubeassociation.org/api/v0` |
    /// | `LIVE_COMPETITIONS_URL` | unset                                   |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                    |
    /// | `GROUPBOARD_CACHE_DIR`  | `<user cache dir>/groupboard`           |
    /// | `GROUPBOARD_DATA_DIR`   | `<user data dir>/groupboard`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = non_empty("WCA_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let live_competitions_url = non_empty("LIVE_COMPETITIONS_URL");

        let request_timeout_secs = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value: raw,
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let cache_dir = non_empty("GROUPBOARD_CACHE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("groupboard")));

        let data_dir = non_empty("GROUPBOARD_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|dir| dir.join("groupboard")))
            .unwrap_or_else(|| PathBuf::from(".groupboard"));

        Ok(Self {
            api_url,
            live_competitions_url,
            request_timeout_secs,
            cache_dir,
            data_dir,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
