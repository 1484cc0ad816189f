//! Configuration module
//!
//! Client configuration is read from the environment (and an optional `.env`
//! file). Command-line flags may override the webhook afterwards.

use std::env;

use url::{Host, Url};

use crate::constants::DEFAULT_WEBHOOK_URL;

/// Settings for reaching the video-generation webhook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub webhook_url: String,
    /// TCP connect timeout. The request itself is never timed out.
    pub connect_timeout_secs: Option<u64>,
    pub environment: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            connect_timeout_secs: None,
            environment: "development".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = get("VIDFORM_WEBHOOK_URL")
            .or_else(|| get("WEBHOOK_URL"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string());

        let connect_timeout_secs = match get("VIDFORM_CONNECT_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!(
                    "VIDFORM_CONNECT_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                )
            })?),
            None => None,
        };

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let config = Self {
            webhook_url,
            connect_timeout_secs,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the webhook, e.g. from a command-line flag.
    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Result<Self, anyhow::Error> {
        self.webhook_url = webhook_url.into();
        self.validate()?;
        Ok(self)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let parsed = Url::parse(&self.webhook_url)
            .map_err(|e| anyhow::anyhow!("Invalid webhook URL '{}': {}", self.webhook_url, e))?;

        match parsed.scheme() {
            "https" => {}
            "http" => {
                if self.is_production() && !is_loopback(&parsed) {
                    return Err(anyhow::anyhow!(
                        "Webhook URL must use https in production unless it points at localhost"
                    ));
                }
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Webhook URL must start with http:// or https://, got '{}'",
                    self.webhook_url
                ))
            }
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(anyhow::anyhow!(
                "Webhook URL has no host: '{}'",
                self.webhook_url
            ));
        }

        Ok(())
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
