// src/core/mod.rs
//! Pure cryptographic operations, no I/O
//!
//! All functions work exclusively on in-memory values. Key derivation
//! returns errors for configuration mistakes; decryption returns `Option`.
pub mod decrypt;
pub mod derive;
pub mod encrypt;
pub mod envelope;
pub mod stream;

pub use decrypt::{
    decrypt, decrypt_hybrid_record, decrypt_legacy, decrypt_with_format, decrypt_with_pem,
};
pub use derive::{derive_keypair, derive_keypair_versioned, derive_seed, keypair_from_stream};
pub use encrypt::{
    encrypt, encrypt_hybrid, encrypt_legacy, envelope_format_for, max_legacy_plaintext_len,
};
pub use envelope::{Envelope, HybridEnvelope, MalformedHybrid};
pub use stream::DeterministicStream;

pub type Result<T> = std::result::Result<T, crate::error::CoreError>;
