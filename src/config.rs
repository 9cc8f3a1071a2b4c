use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SATELLITES_API_KEY_ENV: &str = "SKYWATCH_SATELLITES_API_KEY";
pub const IMAGERY_API_KEY_ENV: &str = "SKYWATCH_IMAGERY_API_KEY";
pub const WEATHER_API_KEY_ENV: &str = "SKYWATCH_WEATHER_API_KEY";

pub const DEFAULT_SATELLITES_BASE_URL: &str = "https://api.n2yo.com/rest/v1";
pub const DEFAULT_IMAGERY_BASE_URL: &str = "https://api.nasa.gov";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),
    #[error("invalid home location: {0}")]
    Home(#[from] crate::geo::LocationError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub satellites: ProviderConfig,
    #[serde(default)]
    pub imagery: ProviderConfig,
    #[serde(default)]
    pub weather: ProviderConfig,
    /// Transport timeout for upstream calls. Unset keeps the client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderConfig {
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
    }

    pub fn api_key(&self, env_var: &'static str) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential(env_var))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default = "default_countries_base_url")]
    pub countries_base_url: String,
    #[serde(default = "default_locate_timeout_secs")]
    pub locate_timeout_secs: u64,
    /// Fixed `"lat,lon"` used as the device position when running headless.
    #[serde(default)]
    pub home: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            countries_base_url: default_countries_base_url(),
            locate_timeout_secs: default_locate_timeout_secs(),
            home: None,
        }
    }
}

impl ClientConfig {
    /// The configured headless position, parsed.
    pub fn home_location(&self) -> Result<Option<crate::geo::Location>, ConfigError> {
        match &self.home {
            Some(home) => Ok(Some(crate::geo::Location::from_coordinates(home)?)),
            None => Ok(None),
        }
    }
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_countries_base_url() -> String {
    DEFAULT_COUNTRIES_BASE_URL.to_string()
}

fn default_locate_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Loads the optional YAML file, then lets the process environment supply credentials.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let providers = [
            (&mut self.upstream.satellites, SATELLITES_API_KEY_ENV),
            (&mut self.upstream.imagery, IMAGERY_API_KEY_ENV),
            (&mut self.upstream.weather, WEATHER_API_KEY_ENV),
        ];
        for (provider, env_var) in providers {
            if let Some(key) = lookup(env_var).filter(|k| !k.is_empty()) {
                provider.api_key = Some(key);
            }
        }
    }

    /// Checks everything the gateway needs before it starts listening.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.upstream.satellites.api_key(SATELLITES_API_KEY_ENV)?;
        self.upstream.imagery.api_key(IMAGERY_API_KEY_ENV)?;
        self.upstream.weather.api_key(WEATHER_API_KEY_ENV)?;
        Ok(())
    }
}
