// src/core/derive.rs
//! Secret → seed → deterministic stream → RSA keypair
//!
//! The mapping is a pure function of (secret, bits, version). Nothing here
//! touches disk; persisting the result is the caller's business.

use hkdf::Hkdf;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use crate::aliases::Seed;
use crate::consts::{SEED_LEN, V1_HKDF_INFO, V1_HKDF_SALT};
use crate::core::stream::DeterministicStream;
use crate::enums::{DerivationVersion, KeyStrength};
use crate::error::{CoreError, Result};
use crate::key_ops::Keypair;

/// Run HKDF-SHA256 over the UTF-8 bytes of `secret`
pub fn derive_seed(secret: &str, version: DerivationVersion) -> Result<Seed> {
    if secret.is_empty() {
        return Err(CoreError::EmptySecret);
    }

    let (salt, info) = match version {
        DerivationVersion::V1 => (V1_HKDF_SALT, V1_HKDF_INFO),
    };

    let hk = Hkdf::<Sha256>::new(Some(salt), secret.as_bytes());
    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    hk.expand(info, seed.as_mut_slice())
        .map_err(|e| CoreError::Kdf(e.to_string()))?;
    Ok(seed)
}

/// Derive the format-v1 keypair for `secret`
///
/// Same secret and bit size always give byte-identical PEMs.
pub fn derive_keypair(secret: &str, bits: usize) -> Result<Keypair> {
    derive_keypair_versioned(secret, bits, DerivationVersion::default())
}

pub fn derive_keypair_versioned(
    secret: &str,
    bits: usize,
    version: DerivationVersion,
) -> Result<Keypair> {
    let strength = KeyStrength::try_from(bits)?;
    let seed = derive_seed(secret, version)?;
    let mut stream = DeterministicStream::new(&seed);
    let keypair = keypair_from_stream(&mut stream, strength)?;

    debug!(
        version = version.as_str(),
        bits,
        stream_bytes = stream.consumed(),
        fingerprint = %keypair.fingerprint(),
        "derived keypair"
    );
    Ok(keypair)
}

/// Generate a keypair using `stream` as the sole randomness source
///
/// Fails with [`CoreError::StreamExhausted`] if the stream could not
/// supply every byte key generation asked for.
pub fn keypair_from_stream(
    stream: &mut DeterministicStream,
    strength: KeyStrength,
) -> Result<Keypair> {
    let private_key = RsaPrivateKey::new(stream, strength.bits())?;

    if stream.is_exhausted() {
        return Err(CoreError::StreamExhausted {
            consumed: stream.consumed(),
        });
    }

    let private_pem = private_key
        .to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| CoreError::KeyEncoding(e.to_string()))?;
    let public_pem = private_key
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CoreError::KeyEncoding(e.to_string()))?;

    Ok(Keypair::from_pems(private_pem, public_pem))
}
