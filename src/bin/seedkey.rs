// src/bin/seedkey.rs
//! seedkey: regenerate the worker keypair from its secret, print the
//! public key, then decrypt envelopes read one per line from stdin.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rpassword::prompt_password;
use seeded_key_vault::{decrypt_with_format, load_config, KeyCache, Keypair};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

const MNEMONIC_ENV: &str = "SKV_MNEMONIC";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config();
    let strength = config
        .key_strength()
        .context("unsupported [keys] bits in config")?;

    let secret = match std::env::var(MNEMONIC_ENV) {
        Ok(value) => Zeroizing::new(value),
        Err(_) => Zeroizing::new(prompt_password("Secret: ").context("failed to read secret")?),
    };
    let secret = Zeroizing::new(secret.trim().to_owned());

    let keypair = if config.features.cache_keys {
        KeyCache::from_config(config)
            .load_or_derive(&secret, strength.bits())
            .context("failed to load or derive keypair")?
    } else {
        Keypair::derive(&secret, strength.bits()).context("failed to derive keypair")?
    };
    info!(fingerprint = %keypair.fingerprint(), bits = strength.bits(), "keypair ready");

    let private_key = keypair
        .private_key()
        .context("derived private key did not parse")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(keypair.public_pem().as_bytes())?;
    out.flush()?;

    let mut decrypted = 0usize;
    let mut rejected = 0usize;
    for (index, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        let envelope = line.trim();
        if envelope.is_empty() {
            continue;
        }

        match decrypt_with_format(envelope, &private_key) {
            Some((plaintext, format)) => {
                decrypted += 1;
                info!(line = index + 1, ?format, "decrypted");
                writeln!(out, "{plaintext}")?;
            }
            None => {
                rejected += 1;
                warn!(line = index + 1, "undecryptable envelope");
            }
        }
    }

    info!(decrypted, rejected, "done");
    Ok(())
}
