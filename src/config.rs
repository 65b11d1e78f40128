//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::assistant::ModelSet;
use crate::gemini::{GeminiConfig as GeminiClientConfig, DEFAULT_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Largest accepted request body (message plus history)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hosted model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub max_retries: u32,

    #[serde(default)]
    pub models: ModelsConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model_timeout() -> u64 {
    60
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            request_timeout_secs: default_model_timeout(),
            max_retries: 0,
            models: ModelsConfig::default(),
        }
    }
}

impl GeminiConfig {
    /// Settings for the REST client
    pub fn client_config(&self) -> GeminiClientConfig {
        GeminiClientConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            request_timeout_ms: self.request_timeout_secs * 1000,
            max_retries: self.max_retries,
        }
    }
}

/// Model name per assistant; unset entries keep the built-in choice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelsConfig {
    pub concierge: Option<String>,
    pub maps: Option<String>,
    pub guide: Option<String>,
    pub fast: Option<String>,
    pub chef: Option<String>,
    pub image: Option<String>,
}

impl ModelsConfig {
    /// Resolve against the built-in model set
    pub fn resolve(&self) -> ModelSet {
        let defaults = ModelSet::default();
        let pick = |value: &Option<String>, fallback: String| {
            value.clone().filter(|v| !v.trim().is_empty()).unwrap_or(fallback)
        };
        ModelSet {
            concierge: pick(&self.concierge, defaults.concierge),
            maps: pick(&self.maps, defaults.maps),
            guide: pick(&self.guide, defaults.guide),
            fast: pick(&self.fast, defaults.fast),
            chef: pick(&self.chef, defaults.chef),
            image: pick(&self.image, defaults.image),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    pub fn filter_directive(&self) -> String {
        format!("fvg_portal={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, searched in order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("fvg-portal").join("config.toml")),
            Some(PathBuf::from("/etc/fvg-portal/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    ///
    /// Returns the file the config came from, `None` for defaults. A file that
    /// exists but cannot be read or parsed is an error, not a silent fallback.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file of `paths` with environment overrides
    pub fn load_first(paths: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment in production)
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = lookup("FVG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FVG_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid FVG_PORT: {}", port),
            }
        }

        // Model overrides; API_KEY wins over GEMINI_API_KEY
        if let Some(key) = lookup("API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
            self.gemini.api_key = Some(key);
        }
        if let Some(url) = lookup("FVG_GEMINI_BASE_URL") {
            self.gemini.base_url = url;
        }

        // Logging overrides
        if let Some(level) = lookup("FVG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FVG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# FVG Luxury Portal Configuration
#
# Environment variables override these settings:
# - FVG_HOST
# - FVG_PORT
# - API_KEY (or GEMINI_API_KEY)
# - FVG_GEMINI_BASE_URL
# - FVG_LOG_LEVEL
# - FVG_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8080

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Largest accepted request body in bytes
max_body_bytes = 1048576

[gemini]
# Generative Language API key (prefer the API_KEY environment variable)
# api_key = ""

# API endpoint
base_url = "https://generativelanguage.googleapis.com"

# Model request timeout in seconds
request_timeout_secs = 60

# Extra attempts when rate limited or unreachable
max_retries = 0

[gemini.models]
# concierge = "gemini-3-flash-preview"
# maps = "gemini-2.5-flash"
# guide = "gemini-3-pro-preview"
# fast = "gemini-flash-lite-latest"
# chef = "gemini-3-flash-preview"
# image = "gemini-2.5-flash-image"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.gemini.base_url, DEFAULT_BASE_URL);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.logging.filter_directive(), "fvg_portal=info,tower_http=debug");
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gemini.request_timeout_secs, 60);
        assert_eq!(config.gemini.models.resolve(), ModelSet::default());
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[gemini]
api_key = "abc"
max_retries = 2

[gemini.models]
guide = "gemini-2.5-pro"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.api_key.as_deref(), Some("abc"));
        assert!(config.logging.is_json());

        let models = config.gemini.models.resolve();
        assert_eq!(models.guide, "gemini-2.5-pro");
        assert_eq!(models.fast, ModelSet::default().fast);

        let client = config.gemini.client_config();
        assert_eq!(client.request_timeout_ms, 60_000);
        assert_eq!(client.max_retries, 2);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/fvg.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        let bad = Config::load(file.path()).unwrap_err();
        assert!(matches!(bad, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_first_picks_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[server]\nhost = \"127.0.0.1\"\n").unwrap();

        let (config, source) = Config::load_first(&[missing, present.clone()]).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(source, Some(present));
    }

    #[test]
    fn test_load_first_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = Config::load_first(&[dir.path().join("none.toml")]).unwrap();
        assert!(source.is_none());
        assert_eq!(config.server.max_body_bytes, ServerConfig::default().max_body_bytes);
    }

    #[test]
    fn test_load_first_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[server\nport = 1").unwrap();
        let fallback = dir.path().join("other.toml");
        std::fs::write(&fallback, "[server]\nport = 9999\n").unwrap();

        let err = Config::load_first(&[broken.clone(), fallback]).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, broken),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("FVG_PORT", "7000"),
            ("GEMINI_API_KEY", "from-gemini"),
            ("API_KEY", "from-api"),
            ("FVG_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-api"));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| (k == "FVG_PORT").then(|| "eighty".to_string()));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_blank_api_key_treated_as_missing() {
        let mut config = Config::default();
        config.gemini.api_key = Some("  ".to_string());
        assert!(config.gemini.client_config().api_key.is_none());
    }
}
