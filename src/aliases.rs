// src/aliases.rs
//! Secret-holding types used throughout seeded-key-vault
//!
//! Everything here zeroizes on drop.

use zeroize::Zeroizing;

use crate::consts::{HYBRID_KEY_LEN, SEED_LEN};

/// HKDF output feeding the deterministic stream
pub type Seed = Zeroizing<[u8; SEED_LEN]>;

/// PEM-encoded private key
pub type PrivatePem = Zeroizing<String>;

/// Symmetric key recovered from (or generated for) a hybrid envelope
pub type ContentKey = Zeroizing<Vec<u8>>;

/// Fresh content key for producing hybrid envelopes
pub type ContentKey32 = Zeroizing<[u8; HYBRID_KEY_LEN]>;
