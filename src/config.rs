use crate::logger::LogLevel;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_FALLBACK_FILENAME: &str = "generated_image.png";
pub const DEFAULT_STATUS_DISMISS_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub directory: PathBuf,
    pub fallback_filename: String,
    pub status_dismiss: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub download: DownloadConfig,
    pub log_level: LogLevel,
    pub log_file: Option<String>,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("PINFORGE_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        ServerConfig { base_url }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Joins an endpoint path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        DownloadConfig {
            directory: PathBuf::from("."),
            fallback_filename: DEFAULT_FALLBACK_FILENAME.to_string(),
            status_dismiss: Duration::from_millis(DEFAULT_STATUS_DISMISS_MS),
        }
    }
}

impl DownloadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let directory = env::var("PINFORGE_DOWNLOAD_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or(defaults.directory);
        let fallback_filename = env::var("PINFORGE_FALLBACK_FILENAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.fallback_filename);
        let status_dismiss = env::var("PINFORGE_STATUS_DISMISS_MS")
            .ok()
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.status_dismiss);

        DownloadConfig {
            directory,
            fallback_filename,
            status_dismiss,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_fallback_filename(mut self, name: impl Into<String>) -> Self {
        self.fallback_filename = name.into();
        self
    }

    pub fn with_status_dismiss(mut self, delay: Duration) -> Self {
        self.status_dismiss = delay;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig::default(),
            download: DownloadConfig::default(),
            log_level: LogLevel::Info,
            log_file: None,
            log_json: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let log_level = env::var("PINFORGE_LOG_LEVEL")
            .ok()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LogLevel::Info);
        let log_file = env::var("PINFORGE_LOG_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty());
        let log_json = env::var("PINFORGE_LOG_JSON")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        Config {
            server: ServerConfig::from_env(),
            download: DownloadConfig::from_env(),
            log_level,
            log_file,
            log_json,
        }
    }

    pub fn with_server(mut self, config: ServerConfig) -> Self {
        self.server = config;
        self
    }

    pub fn with_download(mut self, config: DownloadConfig) -> Self {
        self.download = config;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<String>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_log_json(mut self, enabled: bool) -> Self {
        self.log_json = enabled;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
