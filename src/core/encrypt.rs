// src/core/encrypt.rs
//! Producing envelopes for a published public key
//!
//! Short payloads go out as legacy RSA-OAEP; anything past the OAEP limit
//! is wrapped in a hybrid record with a one-time AES-256-GCM key.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::aliases::ContentKey32;
use crate::consts::{GCM_NONCE_LEN, HYBRID_ALG, HYBRID_KEY_LEN, OAEP_SHA256_OVERHEAD};
use crate::core::envelope::HybridEnvelope;
use crate::enums::EnvelopeFormat;
use crate::error::{CoreError, Result};

/// Largest UTF-8 payload (in bytes) a legacy envelope can carry
pub fn max_legacy_plaintext_len(public_key: &RsaPublicKey) -> usize {
    public_key.size().saturating_sub(OAEP_SHA256_OVERHEAD)
}

/// Pick the format a payload of this size would be sent in
pub fn envelope_format_for(public_key: &RsaPublicKey, plaintext: &str) -> EnvelopeFormat {
    if plaintext.len() <= max_legacy_plaintext_len(public_key) {
        EnvelopeFormat::Legacy
    } else {
        EnvelopeFormat::Hybrid
    }
}

/// Encrypt in whichever format fits
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &str) -> Result<String> {
    match envelope_format_for(public_key, plaintext) {
        EnvelopeFormat::Legacy => encrypt_legacy(public_key, plaintext),
        EnvelopeFormat::Hybrid => encrypt_hybrid(public_key, plaintext),
    }
}

/// base64(RSA-OAEP-SHA256(plaintext)); errors if the payload is too long
pub fn encrypt_legacy(public_key: &RsaPublicKey, plaintext: &str) -> Result<String> {
    let ciphertext = public_key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext.as_bytes())?;
    Ok(STANDARD.encode(ciphertext))
}

/// `{"alg","ek","iv","ct"}` with a fresh key and nonce per call
pub fn encrypt_hybrid(public_key: &RsaPublicKey, plaintext: &str) -> Result<String> {
    let mut content_key: ContentKey32 = Zeroizing::new([0u8; HYBRID_KEY_LEN]);
    OsRng.fill_bytes(content_key.as_mut_slice());
    let mut iv = [0u8; GCM_NONCE_LEN];
    OsRng.fill_bytes(&mut iv);

    let cipher = Aes256Gcm::new_from_slice(content_key.as_slice()).map_err(|_| CoreError::Aead)?;
    // output is body || 16-byte tag
    let ct = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
        .map_err(|_| CoreError::Aead)?;
    let ek = public_key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), content_key.as_slice())?;

    let record = HybridEnvelope {
        alg: HYBRID_ALG.to_owned(),
        ek: STANDARD.encode(ek),
        iv: STANDARD.encode(iv),
        ct: STANDARD.encode(ct),
    };
    Ok(serde_json::to_string(&record)?)
}
