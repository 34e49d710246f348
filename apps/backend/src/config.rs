//! Environment configuration

use std::str::FromStr;

use anyhow::{anyhow, Context};
use chrono::Duration;

/// Server configuration read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Minutes a hosted session may sit untouched before it is dropped.
    pub session_idle_minutes: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `DATABASE_URL` is required.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        Ok(Self {
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            session_idle_minutes: parse_or(&lookup, "SESSION_IDLE_MINUTES", 240)?,
        })
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::minutes(i64::from(self.session_idle_minutes))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, value)),
        None => Ok(default),
    }
}
