use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw HS256 key, exactly 32 bytes.
    pub jwt_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("BUDGETLY_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid BUDGETLY_LISTEN_ADDR")?;
        let db_path =
            std::env::var("BUDGETLY_DB_PATH").unwrap_or_else(|_| "./db/budgetly.db".into());
        let cors_allow = std::env::var("BUDGETLY_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("BUDGETLY_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let raw_secret = std::env::var("BUDGETLY_JWT_SECRET")
            .context("BUDGETLY_JWT_SECRET must be set")?;
        let jwt_secret = decode_secret_key(&raw_secret)?;
        let ttl_secs: u64 = std::env::var("BUDGETLY_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .unwrap_or(86400);
        let log_format =
            std::env::var("BUDGETLY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            log_format,
        })
    }
}
