// src/lib.rs
//! seeded-key-vault: reproducible RSA keypairs from a memorable secret
//!
//! Features:
//! - HKDF-SHA256 seed + SHA-256 counter stream driving RSA key generation
//! - Legacy (RSA-OAEP) and hybrid (RSA-OAEP + AES-GCM) envelope decryption
//! - Decryption that answers `None` instead of failing on hostile input
//! - Optional on-disk key cache that is never the source of truth

pub mod aliases;
pub mod config;
pub mod consts;
pub mod core;
pub mod enums;
pub mod error;
pub mod file_ops;
pub mod key_ops;

// Re-export everything users need at the crate root
pub use config::load as load_config;
pub use crate::core::{
    decrypt, decrypt_with_format, decrypt_with_pem, derive_keypair, encrypt, encrypt_hybrid,
    encrypt_legacy, DeterministicStream, Envelope, HybridEnvelope, Result as CoreResult,
};
pub use enums::{DerivationVersion, EnvelopeFormat, KeyStrength};
pub use error::CoreError;
pub use file_ops::KeyCache;
pub use key_ops::Keypair;
