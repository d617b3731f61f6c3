//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! Nothing else in the workspace reads environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use platform::request::parse_origins;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_LEVEL: &str = "debug";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 3600;
/// Upper bound keeps session expiry representable as a timestamp
const MAX_SESSION_TTL_SECS: u64 = 366 * 24 * 3600;

/// Crates whose log level `LOG_LEVEL` controls when `RUST_LOG` is unset
const LOGGED_CRATES: &[&str] = &["api", "auth", "works", "platform", "kernel", "tower_http"];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub database_url: String,
    pub session_key: [u8; 32],
    /// Key was generated at startup; sessions do not survive a restart
    pub ephemeral_session_key: bool,
    pub db_max_connections: u32,
    /// Per-store-call deadline, also used as the pool acquire timeout
    pub store_timeout: Duration,
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    /// `None` allows any origin
    pub cors_allowed_origins: Option<Vec<HeaderValue>>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let log_level = var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let (session_key, ephemeral_session_key) = match var("SESSION_KEY") {
            Some(encoded) => (decode_session_key(&encoded)?, false),
            None if cfg!(debug_assertions) => (platform::crypto::random_secret(), true),
            None => bail!("SESSION_KEY must be set"),
        };

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };
        if db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be a positive integer");
        }

        let store_timeout_ms = match var("STORE_TIMEOUT_MS") {
            Some(v) => v.parse().context("STORE_TIMEOUT_MS must be an integer")?,
            None => DEFAULT_STORE_TIMEOUT_MS,
        };
        if store_timeout_ms == 0 {
            bail!("STORE_TIMEOUT_MS must be greater than 0");
        }

        let session_ttl_secs = match var("SESSION_TTL_SECS") {
            Some(v) => v.parse().context("SESSION_TTL_SECS must be an integer")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };
        if !(1..=MAX_SESSION_TTL_SECS).contains(&session_ttl_secs) {
            bail!("SESSION_TTL_SECS must be between 1 and {MAX_SESSION_TTL_SECS}");
        }

        let cookie_secure = match var("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).context("COOKIE_SECURE must be true or false")?,
            None => !cfg!(debug_assertions),
        };

        let cors_allowed_origins = match var("CORS_ALLOWED_ORIGINS") {
            Some(raw) => {
                let origins = parse_origins(&raw);
                if origins.is_empty() {
                    bail!("CORS_ALLOWED_ORIGINS contains no valid origin");
                }
                Some(origins)
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            log_level,
            database_url,
            session_key,
            ephemeral_session_key,
            db_max_connections,
            store_timeout: Duration::from_millis(store_timeout_ms),
            session_ttl: Duration::from_secs(session_ttl_secs),
            cookie_secure,
            cors_allowed_origins,
        })
    }

    /// Filter directives used when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> String {
        LOGGED_CRATES
            .iter()
            .map(|krate| format!("{krate}={}", self.log_level))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            session_secret: self.session_key,
            session_ttl: self.session_ttl,
            cookie_secure: self.cookie_secure,
            ..AuthConfig::default()
        }
    }
}

fn decode_session_key(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(encoded.trim())
        .context("SESSION_KEY must be base64")?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        anyhow::anyhow!("SESSION_KEY must decode to 32 bytes, got {}", bytes.len())
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
