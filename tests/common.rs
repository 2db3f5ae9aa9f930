// tests/common.rs
//! Shared test utilities: logging setup and one derived keypair per binary

use once_cell::sync::Lazy;
use rsa::{RsaPrivateKey, RsaPublicKey};
use seeded_key_vault::Keypair;

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[allow(dead_code)]
pub const SECRET: &str = "correct horse battery staple";

/// 2048-bit keypair for [`SECRET`], derived once per test binary
#[allow(dead_code)]
pub static KEYPAIR: Lazy<Keypair> =
    Lazy::new(|| Keypair::derive(SECRET, 2048).expect("derive test keypair"));

#[allow(dead_code)]
pub static PRIVATE_KEY: Lazy<RsaPrivateKey> =
    Lazy::new(|| KEYPAIR.private_key().expect("parse test private key"));

#[allow(dead_code)]
pub static PUBLIC_KEY: Lazy<RsaPublicKey> =
    Lazy::new(|| KEYPAIR.public_key().expect("parse test public key"));

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
#[allow(dead_code)]
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok();

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}
