use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::notifier::DEFAULT_CHANNEL_CAPACITY;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub accounts: AccountsConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/public`
    pub static_dir: String,
}

/// Where registered accounts live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStore {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountsConfig {
    pub store: AccountStore,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Per-subscriber queue length before events are dropped
    pub channel_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a number")?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
        };

        let store = match env::var("ACCOUNT_STORE")
            .unwrap_or_else(|_| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => AccountStore::Memory,
            "file" => AccountStore::File,
            other => anyhow::bail!(
                "ACCOUNT_STORE must be 'memory' or 'file', got '{}'",
                other
            ),
        };
        let accounts = AccountsConfig {
            store,
            path: env::var("ACCOUNTS_PATH").unwrap_or_else(|_| "users.json".to_string()),
        };

        let channel_capacity: usize = env::var("EVENT_CHANNEL_CAPACITY")
            .unwrap_or_else(|_| DEFAULT_CHANNEL_CAPACITY.to_string())
            .parse()
            .context("EVENT_CHANNEL_CAPACITY must be a number")?;
        if channel_capacity == 0 {
            anyhow::bail!("EVENT_CHANNEL_CAPACITY must be greater than zero");
        }
        let events = EventsConfig { channel_capacity };

        Ok(Config {
            server,
            accounts,
            events,
        })
    }

    /// Configuration for tests: in-memory accounts, ephemeral port
    pub fn in_memory() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                static_dir: "public".to_string(),
            },
            accounts: AccountsConfig {
                store: AccountStore::Memory,
                path: String::new(),
            },
            events: EventsConfig {
                channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            },
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
