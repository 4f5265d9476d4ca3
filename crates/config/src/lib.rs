//! # invmgr-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`INVMGR_*` prefix, `__` as separator)
//! 2. Project-level `./invmgr.toml`
//! 3. User-level `<config dir>/invmgr/config.toml`
//! 4. Built-in defaults
//!
//! `INVMGR_STORAGE__DATA_FILE` maps to `storage.data_file`,
//! `INVMGR_LOG__LEVEL` to `log.level`, and so on.

mod error;
mod log;
mod storage;

pub use error::ConfigError;
pub use log::{LogConfig, LogFormat};
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const LOCAL_CONFIG_FILE: &str = "invmgr.toml";
const ENV_PREFIX: &str = "INVMGR_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvMgrConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl InvMgrConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("invmgr").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.data_file".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log.level".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
