// src/key_ops.rs
//! Keypair representation and PEM parsing
//!
//! A [`Keypair`] is just the two PEM strings. The private half zeroizes on
//! drop and is never printed by `Debug`.

use std::fmt;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::aliases::PrivatePem;
use crate::core::derive::derive_keypair;
use crate::error::{CoreError, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct Keypair {
    private_pem: PrivatePem,
    public_pem: String,
}

impl Keypair {
    /// Regenerate the keypair for `secret` (format v1)
    pub fn derive(secret: &str, bits: usize) -> Result<Self> {
        derive_keypair(secret, bits)
    }

    pub fn from_pems(private_pem: PrivatePem, public_pem: String) -> Self {
        Self {
            private_pem,
            public_pem,
        }
    }

    /// PKCS#1 PEM (`BEGIN RSA PRIVATE KEY`)
    pub fn private_pem(&self) -> &str {
        &self.private_pem
    }

    /// SPKI PEM (`BEGIN PUBLIC KEY`)
    pub fn public_pem(&self) -> &str {
        &self.public_pem
    }

    pub fn private_key(&self) -> Result<RsaPrivateKey> {
        parse_private_key_pem(&self.private_pem)
    }

    pub fn public_key(&self) -> Result<RsaPublicKey> {
        parse_public_key_pem(&self.public_pem)
    }

    /// BLAKE3 of the public PEM, lowercase hex
    pub fn fingerprint(&self) -> String {
        blake3::hash(self.public_pem.as_bytes()).to_hex().to_string()
    }

    /// True when the private half actually belongs to the public half
    pub fn is_consistent(&self) -> bool {
        match (self.private_key(), self.public_key()) {
            (Ok(private), Ok(public)) => private.to_public_key() == public,
            _ => false,
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("private_pem", &"[REDACTED]")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Accepts PKCS#1 (`BEGIN RSA PRIVATE KEY`) or PKCS#8 (`BEGIN PRIVATE KEY`)
pub fn parse_private_key_pem(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs1_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
        .map_err(|e| CoreError::KeyEncoding(e.to_string()))
}

pub fn parse_public_key_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem).map_err(|e| CoreError::KeyEncoding(e.to_string()))
}
