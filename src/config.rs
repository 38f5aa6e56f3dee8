use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;
use reqwest::Url;
use thiserror::Error;

use crate::{
    application::handlers::media_queue::DEFAULT_MEDIA_COOLDOWN,
    domain::value_objects::DestinationSet,
};

const DEFAULT_PORT: u16 = 3002;
const DEFAULT_WEBHOOK_URL_1: &str =
    "https://agent.echowkidar.in/webhook-test/e77397ab-fe1b-407b-9afe-77edab1dd92d";
const DEFAULT_WEBHOOK_URL_2: &str =
    "https://agent.echowkidar.in/webhook/e77397ab-fe1b-407b-9afe-77edab1dd92d";
const DEFAULT_SESSION_PROVIDER_URL: &str = "http://localhost:21465";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("An error occured while parsing {name} env param: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} is not an absolute http(s) url: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub webhook_urls: DestinationSet,
    pub media_cooldown: Duration,
    pub webhook_timeout: Duration,
    pub session_provider_url: String,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|name| var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let webhook_urls = vec![
            url_param(&lookup, "N8N_WEBHOOK_URL_1", DEFAULT_WEBHOOK_URL_1)?,
            url_param(&lookup, "N8N_WEBHOOK_URL_2", DEFAULT_WEBHOOK_URL_2)?,
        ];

        Ok(Config {
            port: number_param(&lookup, "PORT", DEFAULT_PORT)?,
            scheme: lookup("SCHEME").unwrap_or_else(|| "http".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "localhost".to_string()),
            webhook_urls: DestinationSet::new(webhook_urls),
            media_cooldown: Duration::from_secs(number_param(
                &lookup,
                "MEDIA_COOLDOWN_SECONDS",
                DEFAULT_MEDIA_COOLDOWN.as_secs(),
            )?),
            webhook_timeout: Duration::from_secs(number_param(
                &lookup,
                "WEBHOOK_TIMEOUT_SECONDS",
                30,
            )?),
            session_provider_url: url_param(
                &lookup,
                "SESSION_PROVIDER_URL",
                DEFAULT_SESSION_PROVIDER_URL,
            )?,
        })
    }
}

fn number_param<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

fn url_param(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = lookup(name)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string());
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value),
        _ => Err(ConfigError::InvalidUrl { name, value }),
    }
}
