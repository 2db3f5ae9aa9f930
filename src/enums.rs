// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the user-visible choices: derivation format
//! version, RSA strength and envelope format.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Versioned seed → keypair construction
///
/// A published public key is tied to the version that produced it, so
/// variants are only ever added, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum DerivationVersion {
    /// HKDF-SHA256 seed stretched by a SHA-256 counter stream
    #[default]
    V1,
}

impl DerivationVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            DerivationVersion::V1 => "v1",
        }
    }
}

/// Supported RSA modulus sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeyStrength {
    #[default]
    Rsa2048,
    Rsa3072,
    Rsa4096,
}

impl KeyStrength {
    pub fn bits(&self) -> usize {
        match self {
            KeyStrength::Rsa2048 => 2048,
            KeyStrength::Rsa3072 => 3072,
            KeyStrength::Rsa4096 => 4096,
        }
    }
}

impl TryFrom<usize> for KeyStrength {
    type Error = CoreError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        match bits {
            2048 => Ok(KeyStrength::Rsa2048),
            3072 => Ok(KeyStrength::Rsa3072),
            4096 => Ok(KeyStrength::Rsa4096),
            other => Err(CoreError::UnsupportedKeySize(other)),
        }
    }
}

/// Wire format of an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeFormat {
    /// base64 of a single RSA-OAEP ciphertext
    Legacy,
    /// JSON record: RSA-OAEP wrapped AES-GCM key + payload
    Hybrid,
}
