use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Serializes a secret as "set" or null so `config show` never prints it.
fn mask_secret<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_str("set"),
        None => serializer.serialize_none(),
    }
}

/// Identity provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Firebase web API key
    #[serde(serialize_with = "mask_secret")]
    pub api_key: Option<String>,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// Server URL (e.g., "https://packit.example.com")
    pub server_url: Option<String>,
    /// Push after writes and restore at startup (default: false)
    #[serde(default)]
    pub auto_sync: bool,
}

impl SyncConfig {
    /// Returns true if a document server is configured
    pub fn is_configured(&self) -> bool {
        self.server_url.is_some()
    }
}

/// Weather lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherConfig {
    #[serde(serialize_with = "mask_secret")]
    pub api_key: Option<String>,
    /// Overrides the OpenWeatherMap API base
    pub base_url: Option<String>,
}

/// AI completion configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AiConfig {
    #[serde(serialize_with = "mask_secret")]
    pub api_key: Option<String>,
    /// OpenAI-compatible chat completions URL
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the list snapshot and session
    pub data_dir: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub auth: AuthConfig,
    pub sync: SyncConfig,
    pub weather: WeatherConfig,
    pub ai: AiConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    auth: Option<AuthConfig>,
    sync: Option<SyncConfig>,
    weather: Option<WeatherConfig>,
    ai: Option<AiConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut config_file = None;
        let mut auth = AuthConfig::default();
        let mut sync = SyncConfig::default();
        let mut weather = WeatherConfig::default();
        let mut ai = AiConfig::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            auth = file_config.auth.unwrap_or_default();
            sync = file_config.sync.unwrap_or_default();
            weather = file_config.weather.unwrap_or_default();
            ai = file_config.ai.unwrap_or_default();
        }

        if let Ok(dir) = std::env::var("PACKIT_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("PACKIT_SYNC_URL") {
            sync.server_url = Some(url);
        }
        if let Ok(key) = std::env::var("PACKIT_AUTH_API_KEY") {
            auth.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPEN_WEATHER_API_KEY") {
            weather.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            ai.api_key = Some(key);
        }
        if let Ok(model) = std::env::var("PACKIT_AI_MODEL") {
            ai.model = Some(model);
        }

        Ok(Self {
            data_dir,
            config_file,
            auth,
            sync,
            weather,
            ai,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/packit/
    /// - macOS: ~/Library/Application Support/packit/
    /// - Windows: %APPDATA%/packit/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("packit")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/packit/
    /// - macOS: ~/Library/Application Support/packit/
    /// - Windows: %APPDATA%/packit/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("packit")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
