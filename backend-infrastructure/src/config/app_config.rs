use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub database_url: String,
    pub led_controller_url: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3341".to_string(),
            api_token: None,
            database_url: "sqlite://cellar.db".to_string(),
            led_controller_url: None,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("CELLAR_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        if let Some(url) = &self.led_controller_url {
            if url.trim().is_empty() {
                self.led_controller_url = None;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.database_url.trim().is_empty() {
            return Err(anyhow!("database_url must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            database_url: self.database_url.clone(),
            led_controller_url: self.led_controller_url.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("CELLAR_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("CELLAR_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("CELLAR_DATABASE_URL") {
            self.database_url = value;
        }
        if let Ok(value) = env::var("CELLAR_LED_CONTROLLER_URL") {
            self.led_controller_url = Some(value);
        }
        if let Ok(value) = env::var("CELLAR_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("CELLAR_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_optionals() {
        let mut config = AppConfig {
            api_token: Some("   ".to_string()),
            led_controller_url: Some(String::new()),
            ..AppConfig::default()
        };
        config.normalize();
        assert!(config.api_token.is_none());
        assert!(config.led_controller_url.is_none());
    }

    #[test]
    fn validate_rejects_bad_bind_addr() {
        let config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_database_url() {
        let config = AppConfig {
            database_url: "  ".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_pass_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        let runtime = config.to_runtime_config();
        assert_eq!(runtime.bind_addr, config.bind_addr);
        assert_eq!(runtime.database_url, config.database_url);
    }
}
