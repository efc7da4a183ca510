//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

/// Value shown in place of the bot token
pub const REDACTED: &str = "--Redacted--";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    /// Display name, also the webhook name
    pub name: String,
    pub email: String,
    pub token: String,
    /// Externally reachable webhook target
    pub url: String,
    /// Command run when no command matches
    pub default_action: Option<String>,
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            token: String::new(),
            url: String::new(),
            default_action: Some("/help".to_string()),
            debug: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://webexapis.com/v1".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Publicly visible configuration, with the token masked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub email: String,
    pub token: String,
    pub url: String,
    pub name: String,
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// File (if present), then environment, then an explicit token
    pub fn resolve(path: impl AsRef<Path>, token_override: Option<String>) -> Result<Self, ConfigError> {
        Self::resolve_with(path.as_ref(), token_override, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        path: &Path,
        token_override: Option<String>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Config::load(path)?
        } else {
            Config::default()
        };
        config.apply_vars(var)?;
        if let Some(token) = token_override {
            config.bot.token = token;
        }
        Ok(config)
    }

    /// Override fields from `SPARK_BOT_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(name) = var("SPARK_BOT_APP_NAME").or_else(|| var("SPARK_BOT_NAME")) {
            self.bot.name = name;
        }
        if let Some(email) = var("SPARK_BOT_EMAIL") {
            self.bot.email = email;
        }
        if let Some(token) = var("SPARK_BOT_TOKEN") {
            self.bot.token = token;
        }
        if let Some(url) = var("SPARK_BOT_URL") {
            self.bot.url = url;
        }
        if let Some(port) = var("SPARK_BOT_PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                ConfigError::InvalidValue(format!("SPARK_BOT_PORT must be a port number, got '{}'", port))
            })?;
        }
        Ok(())
    }

    /// Check that everything needed to start is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("bot.name", &self.bot.name),
            ("bot.url", &self.bot.url),
            ("bot.token", &self.bot.token),
            ("bot.email", &self.bot.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(field.to_string()));
            }
        }

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "api.timeout-seconds must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            email: self.bot.email.clone(),
            token: REDACTED.to_string(),
            url: self.bot.url.clone(),
            name: self.bot.name.clone(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
