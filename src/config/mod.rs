// src/config/mod.rs
//! Configuration system for seeded-key-vault
//!
//! Central, lazy-loaded global config with TOML + env overrides. Only
//! operational settings live here; derivation labels are compiled in.

pub use app::{load, Config, Features, Keys, Paths, CONFIG_ENV, KEYS_DIR_ENV, KEY_BITS_ENV};

mod app;
mod defaults;
