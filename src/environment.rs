// src/environment.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Mail relay settings. The password is deliberately absent here: it comes
/// only from the SMTP_PASSWORD environment variable, never a file literal.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub relay: String,
    pub port: u16,
    pub sender: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    pub external_source_url: String,
    #[serde(default = "default_external_timeout")]
    pub external_timeout_seconds: u64,
    pub smtp: SmtpConfig,
}

fn default_external_timeout() -> u64 {
    5
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_from_file(&environment)
    }

    fn get_environment() -> String {
        std::env::var("JOBBERWOCKY_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            anyhow::bail!("config.yaml not found in current directory. Server cannot start without configuration.");
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(env_config)
    }

    /// Relay credential supplied out-of-band; None means unauthenticated.
    pub fn smtp_password() -> Option<String> {
        std::env::var("SMTP_PASSWORD").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_with_defaulted_fields() {
        let yaml = r#"
external_source_url: http://localhost:9000/jobs
smtp:
  relay: localhost
  port: 2525
  sender: alerts@jobberwocky.example
"#;

        let config: EnvironmentConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.external_source_url, "http://localhost:9000/jobs");
        assert_eq!(config.external_timeout_seconds, 5);
        assert_eq!(config.smtp.port, 2525);
        assert!(config.smtp.username.is_empty());
    }
}
