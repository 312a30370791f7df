// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf};

use dotenvy::dotenv;
use url::Url;

use crate::error::QuizError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_BANK_PATH: &str = "data/questions.json";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bank_path: PathBuf,
    pub server_url: String,
    /// Play against the local bank instead of a server.
    pub offline: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let bind_addr = env::var("QUIZ_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let bank_path = env::var("QUIZ_BANK_PATH")
            .unwrap_or_else(|_| DEFAULT_BANK_PATH.to_string())
            .into();

        let server_url = env::var("QUIZ_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        let offline = env::var("QUIZ_OFFLINE")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            bind_addr,
            bank_path,
            server_url,
            offline,
            rust_log,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, QuizError> {
        self.bind_addr
            .parse()
            .map_err(|e| QuizError::Config(format!("QUIZ_BIND_ADDR '{}': {}", self.bind_addr, e)))
    }

    pub fn server_url(&self) -> Result<Url, QuizError> {
        Url::parse(&self.server_url)
            .map_err(|e| QuizError::Config(format!("QUIZ_SERVER_URL '{}': {}", self.server_url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(bind_addr: &str, server_url: &str) -> Config {
        Config {
            bind_addr: bind_addr.to_string(),
            bank_path: DEFAULT_BANK_PATH.into(),
            server_url: server_url.to_string(),
            offline: false,
            rust_log: "error".to_string(),
        }
    }

    #[test]
    fn parses_defaults() {
        let cfg = config(DEFAULT_BIND_ADDR, DEFAULT_SERVER_URL);
        assert_eq!(cfg.socket_addr().unwrap().port(), 3000);
        assert_eq!(cfg.server_url().unwrap().host_str(), Some("127.0.0.1"));
    }

    #[test]
    fn rejects_garbage() {
        let cfg = config("not-an-addr", "::nope");
        assert!(matches!(cfg.socket_addr(), Err(QuizError::Config(_))));
        assert!(matches!(cfg.server_url(), Err(QuizError::Config(_))));
    }
}
