// src/consts.rs
//! Shared constants: format-v1 derivation labels and envelope parameters
//!
//! Everything in the first block is part of the key-compatibility contract.
//! Changing any of it changes every derived keypair.

/// HKDF salt for format v1
pub const V1_HKDF_SALT: &[u8] = b"seeded-key-vault/rsa/v1/salt";

/// HKDF info / context label for format v1
pub const V1_HKDF_INFO: &[u8] = b"seeded-key-vault/rsa/v1/info";

/// Suffix mixed into every stream block after the big-endian counter
pub const V1_STREAM_LABEL: &[u8] = b"/stream";

/// Seed length handed to the deterministic stream
pub const SEED_LEN: usize = 32;

/// SHA-256 output size, one stream block
pub const STREAM_BLOCK_LEN: usize = 32;

/// Default RSA modulus size
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Exact (case-sensitive) algorithm tag of a hybrid envelope
pub const HYBRID_ALG: &str = "RSA-OAEP+AES-GCM";

/// AES-GCM nonce length carried in `iv`
pub const GCM_NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length, trailing bytes of `ct`
pub const GCM_TAG_LEN: usize = 16;

/// Symmetric key length used when producing hybrid envelopes
pub const HYBRID_KEY_LEN: usize = 32;

/// OAEP overhead with SHA-256: 2 * hash length + 2
pub const OAEP_SHA256_OVERHEAD: usize = 2 * 32 + 2;

/// Context string for BLAKE3 derive-key when naming cached key files
pub const CACHE_LABEL_CONTEXT: &str = "seeded-key-vault 2025-01 key cache label";

/// Key file names are `rsa_<label>.pem` / `rsa_<label>.pub.pem`
pub const KEY_FILE_PREFIX: &str = "rsa_";
