use std::time::Duration;

use crate::api::error::ConfigError;

/// Per-file upload cap (5 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

pub const PRIORITY_OPTIONS: [&str; 4] = ["Low", "Medium", "High", "Urgent"];

pub struct Env {
    pub webhook_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
    pub workers: usize,
}

impl Env {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup("WEBHOOK_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("WEBHOOK_URL"))?;
        let webhook_url = webhook_url.trim().to_string();
        check_endpoint(&webhook_url)?;

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:5173".to_string());
        let ip = lookup("IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", lookup("PORT"), 8080u16)?;
        let workers = parse_or("WORKERS", lookup("WORKERS"), 2usize)?;

        Ok(Env { webhook_url, frontend_url, ip, port, workers })
    }
}

fn check_endpoint(url: &str) -> Result<(), ConfigError> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| ConfigError::Invalid { var: "WEBHOOK_URL", reason: e.to_string() })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid {
            var: "WEBHOOK_URL",
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Invalid { var, reason: e.to_string() }),
        None => Ok(default),
    }
}
