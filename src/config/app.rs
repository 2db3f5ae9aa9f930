// src/config/app.rs
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::defaults::{
    default_features, default_keys, default_paths, DEFAULT_CONFIG_FILE,
};
use crate::enums::KeyStrength;
use crate::error::Result;

/// Path of the TOML config file
pub const CONFIG_ENV: &str = "SKV_CONFIG";
/// Overrides `[paths] keys_dir`
pub const KEYS_DIR_ENV: &str = "SKV_KEYS_DIR";
/// Overrides `[keys] bits`
pub const KEY_BITS_ENV: &str = "SKV_KEY_BITS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_features")]
    pub features: Features,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    pub bits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    pub keys_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Write derived keys to `keys_dir` and reuse them on the next start
    pub cache_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keys: default_keys(),
            paths: default_paths(),
            features: default_features(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validated modulus size; an unsupported value is a deployment error
    pub fn key_strength(&self) -> Result<KeyStrength> {
        KeyStrength::try_from(self.keys.bits)
    }

    /// Apply `SKV_KEYS_DIR` / `SKV_KEY_BITS` on top of whatever was loaded
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(KEYS_DIR_ENV) {
            self.paths.keys_dir = PathBuf::from(dir);
        }
        if let Ok(bits) = std::env::var(KEY_BITS_ENV) {
            match bits.parse() {
                Ok(bits) => self.keys.bits = bits,
                Err(_) => warn!(value = %bits, "ignoring non-numeric SKV_KEY_BITS"),
            }
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at runtime, falling back to defaults if missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let mut conf = if Path::new(&config_path).exists() {
            Config::from_path(&config_path).unwrap_or_else(|err| {
                warn!(path = %config_path, error = %err, "invalid config, using built-in defaults");
                Config::default()
            })
        } else {
            warn!(path = %config_path, "config not found, using built-in defaults");
            Config::default()
        };

        conf.apply_env_overrides();
        conf
    })
}
