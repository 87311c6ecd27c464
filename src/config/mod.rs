//! Configuration module for the IdeaNest backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (optional for local use)
    pub api_psk: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Artificial latency applied before assist results land on a draft
    pub assist_delay: Duration,
    /// Drafts untouched for longer than this are discarded
    pub draft_ttl: Duration,
    /// Whether to start with the sample categories and ideas
    pub seed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_psk: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            log_json: false,
            assist_delay: Duration::from_millis(1000),
            draft_ttl: Duration::from_secs(24 * 60 * 60),
            seed: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let api_psk = env::var("IDEANEST_API_PSK").ok().filter(|k| !k.is_empty());

        let bind_addr = match env::var("IDEANEST_BIND_ADDR") {
            Ok(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                AppError::Internal(format!("Invalid IDEANEST_BIND_ADDR {:?}: {}", raw, e))
            })?,
            Err(_) => defaults.bind_addr,
        };

        let log_level = env::var("IDEANEST_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_json = match env::var("IDEANEST_LOG_JSON") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Internal(format!("Invalid IDEANEST_LOG_JSON {:?}", raw))
            })?,
            Err(_) => defaults.log_json,
        };

        let assist_delay = match env::var("IDEANEST_ASSIST_DELAY_MS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
                AppError::Internal(format!("Invalid IDEANEST_ASSIST_DELAY_MS {:?}: {}", raw, e))
            })?,
            Err(_) => defaults.assist_delay,
        };

        let draft_ttl = match env::var("IDEANEST_DRAFT_TTL_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                AppError::Internal(format!("Invalid IDEANEST_DRAFT_TTL_SECS {:?}: {}", raw, e))
            })?,
            Err(_) => defaults.draft_ttl,
        };

        let seed = match env::var("IDEANEST_SEED") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Internal(format!("Invalid IDEANEST_SEED {:?}", raw))
            })?,
            Err(_) => defaults.seed,
        };

        Ok(Self {
            api_psk,
            bind_addr,
            log_level,
            log_json,
            assist_delay,
            draft_ttl,
            seed,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
