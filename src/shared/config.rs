#![allow(dead_code)]
//! Process-wide configuration, loaded once via `lazy_static!` from a JSON
//! file named on the command line or in the environment — the same
//! fail-fast-at-startup shape the rest of this ecosystem's services use.

use std::fs::File;
use std::io::Read;

use clap::Parser;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::full_info;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Arguments {
    #[arg(long, default_value = "./settlers.config.json")]
    pub config_file: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub cosmos_account: String,
    pub cosmos_token: String,
    pub cosmos_database_name: String,
    pub host_name: String,
    pub port: u16,
    pub ssl_cert_file: String,
    pub ssl_key_file: String,
    pub session_secret: String,
    pub session_lifetime_days: u64,
    pub snapshot_interval: u64,
    pub reconnect_tail_threshold: u64,
    pub rust_log: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            cosmos_account: String::default(),
            cosmos_token: String::default(),
            cosmos_database_name: String::default(),
            host_name: "127.0.0.1".into(),
            port: 8080,
            ssl_cert_file: String::default(),
            ssl_key_file: String::default(),
            session_secret: String::default(),
            session_lifetime_days: 7,
            snapshot_interval: 50,
            reconnect_tail_threshold: 50,
            rust_log: "info".into(),
        }
    }
}

impl ServiceConfig {
    pub fn from_file(config_file: &str) -> std::io::Result<Self> {
        let mut file = File::open(config_file)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        serde_json::from_str(&contents).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, format!("failed to deserialize config: {e}"))
        })
    }

    /// Loads from `--config-file`/`CATAN_CONFIG_FILE` if present, otherwise
    /// falls back to in-process defaults (what the test harness and the
    /// in-memory store both run against).
    fn load() -> Self {
        let config_file = match Arguments::try_parse() {
            Ok(args) => Some(args.config_file),
            Err(_) => std::env::var("CATAN_CONFIG_FILE").ok(),
        };
        match config_file {
            Some(path) if std::path::Path::new(&path).exists() => {
                full_info!("loading config from {}", path);
                Self::from_file(&path).expect("failed to parse config file")
            }
            _ => {
                full_info!("no config file found, using defaults");
                ServiceConfig::default()
            }
        }
    }
}

lazy_static! {
    pub static ref SERVICE_CONFIG: ServiceConfig = ServiceConfig::load();
}
