// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Storage key the snapshot lives under unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "appState";

/// Choice questions need at least this many options.
pub const MIN_CHOICE_OPTIONS: usize = 2;

pub const MIN_PASSWORD_LENGTH: u64 = 6;
pub const MAX_TITLE_LENGTH: u64 = 200;
pub const MAX_DESCRIPTION_LENGTH: u64 = 2000;
pub const MAX_TEXT_LENGTH: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the storage slot files.
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub log_dir: PathBuf,
    pub rust_log: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

        let storage_key =
            env::var("STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let admin_email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());

        Self {
            data_dir: PathBuf::from(data_dir),
            storage_key,
            log_dir: PathBuf::from(log_dir),
            rust_log,
            admin_email,
            admin_password,
        }
    }
}
