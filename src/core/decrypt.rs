// src/core/decrypt.rs
//! Envelope decryption that never fails loudly
//!
//! Input comes from a public, append-only, multi-author source. Every
//! failure (bad base64, wrong key, tag mismatch, non-UTF-8 plaintext,
//! unknown format) collapses into `None`, and no failure ever panics.
//! Reasons are logged at `trace` level only.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce, Tag};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::{Oaep, RsaPrivateKey};
use sha2::Sha256;
use thiserror::Error;
use tracing::trace;
use zeroize::Zeroizing;

use crate::aliases::ContentKey;
use crate::consts::{GCM_NONCE_LEN, GCM_TAG_LEN};
use crate::core::envelope::{Envelope, HybridEnvelope, MalformedHybrid};
use crate::enums::EnvelopeFormat;
use crate::key_ops::parse_private_key_pem;

/// Why a path rejected its input. Never leaves this module.
#[derive(Debug, Error)]
enum Rejection {
    #[error("empty input")]
    Empty,
    #[error("missing or empty field `{0}`")]
    MissingField(&'static str),
    #[error("invalid base64 in `{0}`")]
    Base64(&'static str),
    #[error("nonce has {0} bytes, expected 12")]
    NonceLength(usize),
    #[error("ciphertext shorter than the authentication tag")]
    Truncated,
    #[error("RSA-OAEP decryption failed")]
    Rsa,
    #[error("unsupported content key length {0}")]
    KeyLength(usize),
    #[error("authentication failed")]
    Tag,
    #[error("plaintext is not UTF-8")]
    Utf8,
}

/// Recover the plaintext of a legacy or hybrid envelope
pub fn decrypt(ciphertext_text: &str, private_key: &RsaPrivateKey) -> Option<String> {
    decrypt_with_format(ciphertext_text, private_key).map(|(plaintext, _)| plaintext)
}

/// Like [`decrypt`], also reporting which path produced the plaintext
pub fn decrypt_with_format(
    ciphertext_text: &str,
    private_key: &RsaPrivateKey,
) -> Option<(String, EnvelopeFormat)> {
    if ciphertext_text.is_empty() {
        return None;
    }

    let outcome = match Envelope::classify(ciphertext_text) {
        Ok(Envelope::Legacy(raw)) => legacy(raw, private_key),
        Ok(Envelope::Hybrid(record)) => {
            decrypt_hybrid(&record, private_key)
                .map(|plaintext| (plaintext, EnvelopeFormat::Hybrid))
                .or_else(|reason| {
                    trace!(%reason, "hybrid path rejected input, trying legacy");
                    legacy(ciphertext_text, private_key)
                })
        }
        Err(MalformedHybrid(err)) => {
            trace!(error = %err, "hybrid tag on malformed record, trying legacy");
            legacy(ciphertext_text, private_key)
        }
    };

    match outcome {
        Ok(found) => Some(found),
        Err(reason) => {
            trace!(%reason, "envelope rejected");
            None
        }
    }
}

/// Import `private_pem` (PKCS#1 or PKCS#8) and decrypt; a bad key is `None` too
pub fn decrypt_with_pem(ciphertext_text: &str, private_pem: &str) -> Option<String> {
    let private_key = match parse_private_key_pem(private_pem) {
        Ok(key) => key,
        Err(err) => {
            trace!(error = %err, "private key did not parse");
            return None;
        }
    };
    decrypt(ciphertext_text, &private_key)
}

/// Legacy path on its own: base64 → RSA-OAEP-SHA256 → UTF-8
pub fn decrypt_legacy(ciphertext_b64: &str, private_key: &RsaPrivateKey) -> Option<String> {
    decrypt_legacy_inner(ciphertext_b64, private_key).ok()
}

/// Hybrid path on its own, without the legacy fallback
pub fn decrypt_hybrid_record(
    record: &HybridEnvelope,
    private_key: &RsaPrivateKey,
) -> Option<String> {
    decrypt_hybrid(record, private_key).ok()
}

fn legacy(
    raw: &str,
    private_key: &RsaPrivateKey,
) -> Result<(String, EnvelopeFormat), Rejection> {
    decrypt_legacy_inner(raw, private_key).map(|plaintext| (plaintext, EnvelopeFormat::Legacy))
}

fn decrypt_legacy_inner(raw: &str, private_key: &RsaPrivateKey) -> Result<String, Rejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Rejection::Empty);
    }

    let ciphertext = STANDARD
        .decode(trimmed)
        .map_err(|_| Rejection::Base64("legacy"))?;
    let plaintext = Zeroizing::new(
        private_key
            .decrypt(Oaep::new::<Sha256>(), &ciphertext)
            .map_err(|_| Rejection::Rsa)?,
    );
    utf8(&plaintext)
}

fn decrypt_hybrid(record: &HybridEnvelope, private_key: &RsaPrivateKey) -> Result<String, Rejection> {
    let ek = decode_field("ek", &record.ek)?;
    let iv = decode_field("iv", &record.iv)?;
    let ct = decode_field("ct", &record.ct)?;

    if iv.len() != GCM_NONCE_LEN {
        return Err(Rejection::NonceLength(iv.len()));
    }
    if ct.len() < GCM_TAG_LEN {
        return Err(Rejection::Truncated);
    }
    let (body, tag_bytes) = ct.split_at(ct.len() - GCM_TAG_LEN);

    let content_key: ContentKey = Zeroizing::new(
        private_key
            .decrypt(Oaep::new::<Sha256>(), &ek)
            .map_err(|_| Rejection::Rsa)?,
    );

    let nonce: &Nonce<U12> = Nonce::from_slice(&iv);
    let tag: &Tag = Tag::from_slice(tag_bytes);
    let mut buffer = Zeroizing::new(body.to_vec());

    let opened = match content_key.len() {
        16 => Aes128Gcm::new_from_slice(&content_key)
            .map_err(|_| Rejection::KeyLength(16))?
            .decrypt_in_place_detached(nonce, b"", buffer.as_mut_slice(), tag),
        32 => Aes256Gcm::new_from_slice(&content_key)
            .map_err(|_| Rejection::KeyLength(32))?
            .decrypt_in_place_detached(nonce, b"", buffer.as_mut_slice(), tag),
        other => return Err(Rejection::KeyLength(other)),
    };
    // on mismatch the buffer holds unauthenticated bytes; it is zeroized on drop
    opened.map_err(|_| Rejection::Tag)?;

    utf8(&buffer)
}

fn decode_field(name: &'static str, value: &str) -> Result<Vec<u8>, Rejection> {
    if value.is_empty() {
        return Err(Rejection::MissingField(name));
    }
    STANDARD.decode(value).map_err(|_| Rejection::Base64(name))
}

fn utf8(bytes: &[u8]) -> Result<String, Rejection> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| Rejection::Utf8)
}
