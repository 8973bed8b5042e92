use std::env;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Minuta";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub const DEFAULT_LOG_FILTER: &str = "minuta=info,tower_http=info";

/// Runtime settings, read once at startup and passed explicitly to the
/// components that need them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        let data_dir = env::var("MINUTA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| app_data_dir());

        Self {
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("MINUTA_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            request_timeout_secs: env::var("MINUTA_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            data_dir,
        }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("minuta.db")
    }

    /// Root directory of the filesystem blob store.
    pub fn blobs_dir(&self) -> PathBuf {
        self.data_dir.join("blobs")
    }
}

/// Get the application data directory
/// ~/Minuta/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Minuta")
}
