use anyhow::{Context, Result};
use std::env;

const DEFAULT_OS_ADDRESS: &str = "http://localhost:9200";
const DEFAULT_EVENT_INDEX: &str = "event_index";
const DEFAULT_BATCH_SIZE: usize = 100;
const DEFAULT_PORT: u16 = 8080;

/// Runtime settings, read from the environment (and `.env`)
#[derive(Clone)]
pub struct AppConfig {
    pub os_address: String,
    pub os_username: Option<String>,
    pub os_password: Option<String>,
    pub event_index: String,
    pub batch_size: usize,
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("os_address", &self.os_address)
            .field("os_username", &self.os_username)
            .field("event_index", &self.event_index)
            .field("batch_size", &self.batch_size)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let os_address = env::var("OS_ADDRESS").unwrap_or_else(|_| DEFAULT_OS_ADDRESS.to_string());
        let event_index =
            env::var("EVENT_INDEX").unwrap_or_else(|_| DEFAULT_EVENT_INDEX.to_string());

        let batch_size = match env::var("BATCH_SIZE") {
            Ok(v) => v
                .parse::<usize>()
                .context("BATCH_SIZE must be a number")?,
            Err(_) => DEFAULT_BATCH_SIZE,
        };
        if batch_size == 0 {
            anyhow::bail!("BATCH_SIZE must be greater than 0");
        }

        let port = match env::var("PORT") {
            Ok(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            os_address: os_address.trim_end_matches('/').to_string(),
            os_username: non_empty_var("OS_USERNAME"),
            os_password: non_empty_var("OS_PASSWORD"),
            event_index,
            batch_size,
            port,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
