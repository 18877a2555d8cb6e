use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{defaults, envvars};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("environment variable {var} has an invalid value: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct SensorApiConfig {
    pub base_url: String,
    pub sensor_id: String,
    pub api_key: String,
    pub read_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct FtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

/// Process-wide configuration, read once at startup and passed into each
/// component explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    pub sensor: SensorApiConfig,
    pub ftp: FtpConfig,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        let sensor = SensorApiConfig {
            base_url: optional(envvars::PURPLE_AIR_API_BASE_URL)
                .unwrap_or_else(|| defaults::SENSOR_API_BASE_URL.to_string()),
            sensor_id: required(envvars::PURPLE_AIR_SENSOR_ID)?,
            api_key: required(envvars::PURPLE_AIR_API_KEY)?,
            read_key: optional(envvars::PURPLE_AIR_READ_KEY),
        };
        let ftp = FtpConfig {
            host: required(envvars::FTP_HOST)?,
            port: match optional(envvars::FTP_PORT) {
                Some(port) => port.parse().map_err(|e| ConfigError::InvalidVar {
                    var: envvars::FTP_PORT,
                    reason: format!("{e}"),
                })?,
                None => defaults::FTP_PORT,
            },
            user: required(envvars::FTP_USER)?,
            password: required(envvars::FTP_PASSWORD)?,
        };
        let output_dir = optional(envvars::OUTPUT_DIR)
            .unwrap_or_else(|| defaults::OUTPUT_DIR.to_string())
            .into();
        Ok(Config {
            sensor,
            ftp,
            output_dir,
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::MissingVar(var))
}

/// An unset or empty variable counts as absent.
fn optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}
