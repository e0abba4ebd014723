/*
 * Responsibility
 * - 環境変数の読み込み (FRONTEND_PORT, API_BASE_URL)
 * - 不正な port は起動失敗
 */
use std::fmt;
use std::net::SocketAddr;

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    // pre-filled in the page; the browser remembers its own override
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match std::env::var("FRONTEND_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("FRONTEND_PORT"))?,
            Err(_) => 5001,
        };

        let api_base_url = std::env::var("API_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "http://localhost:5002/api".to_string());

        Ok(Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            api_base_url,
        })
    }
}
