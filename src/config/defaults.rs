// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Features, Keys, Paths};
use crate::consts::DEFAULT_KEY_BITS;

pub const DEFAULT_CONFIG_FILE: &str = "skv-config.toml";

pub fn default_keys_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("seeded-key-vault").join("keys"))
        .unwrap_or_else(|| PathBuf::from("keys"))
}

pub fn default_keys() -> Keys {
    Keys {
        bits: DEFAULT_KEY_BITS,
    }
}

pub fn default_paths() -> Paths {
    Paths {
        keys_dir: default_keys_dir(),
    }
}

pub fn default_features() -> Features {
    Features { cache_keys: true }
}
