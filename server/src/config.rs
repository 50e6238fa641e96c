// Configuration for the proxy server

use std::path::PathBuf;
use std::time::Duration;

use tts_core::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// 50 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub api_key: Option<String>,
    pub api_url: String,
    pub tts_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            static_dir: PathBuf::from("dist"),
            api_key: None,
            api_url: DEFAULT_ENDPOINT.to_string(),
            tts_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read from the process environment. Call `dotenv::dotenv()` first so a
    /// local `.env` file can supply values the environment does not.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let static_dir = lookup("STATIC_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let api_key = lookup("MINIMAX_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let api_url = lookup("MINIMAX_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_url);

        let tts_timeout_secs = lookup("TTS_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.tts_timeout_secs);

        let max_body_bytes = lookup("MAX_BODY_BYTES")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_body_bytes);

        Self {
            port,
            static_dir,
            api_key,
            api_url,
            tts_timeout_secs,
            max_body_bytes,
        }
    }

    pub fn tts_timeout(&self) -> Duration {
        Duration::from_secs(self.tts_timeout_secs)
    }

    pub fn tts_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
