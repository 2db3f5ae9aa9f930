// src/error.rs
//! Public error type for the entire crate
//!
//! Only configuration and key-handling failures live here. Envelope
//! decryption never returns an error, it returns `None`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("secret must not be empty")]
    EmptySecret,

    #[error("unsupported RSA key size: {0} bits")]
    UnsupportedKeySize(usize),

    #[error("deterministic stream exhausted after {consumed} bytes")]
    StreamExhausted { consumed: u64 },

    #[error("key derivation failed: {0}")]
    Kdf(String),

    #[error("RSA operation failed: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("key encoding failed: {0}")]
    KeyEncoding(String),

    #[error("symmetric encryption failed")]
    Aead,

    #[error("envelope serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
