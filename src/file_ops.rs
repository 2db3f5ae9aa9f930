// src/file_ops.rs
//! On-disk key cache
//!
//! Layout: `<dir>/rsa_<label>.pem` (PKCS#1 private, 0600 on Unix) and
//! `<dir>/rsa_<label>.pub.pem` (SPKI public). The cache only saves the cost
//! of key generation; the secret stays the source of truth and a damaged
//! cache entry is simply derived again.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::config::Config;
use crate::consts::{CACHE_LABEL_CONTEXT, KEY_FILE_PREFIX};
use crate::core::derive::{derive_keypair_versioned, derive_seed};
use crate::enums::{DerivationVersion, KeyStrength};
use crate::error::Result;
use crate::key_ops::Keypair;

#[derive(Debug, Clone)]
pub struct KeyCache {
    dir: PathBuf,
}

impl KeyCache {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.keys_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// (private, public) file paths for `label`
    pub fn key_paths(&self, label: &str) -> (PathBuf, PathBuf) {
        (
            self.dir.join(format!("{KEY_FILE_PREFIX}{label}.pem")),
            self.dir.join(format!("{KEY_FILE_PREFIX}{label}.pub.pem")),
        )
    }

    pub fn store(&self, label: &str, keypair: &Keypair) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let (private_path, public_path) = self.key_paths(label);
        write_private(&private_path, keypair.private_pem())?;
        fs::write(&public_path, keypair.public_pem())?;
        debug!(path = %private_path.display(), "stored keypair");
        Ok(())
    }

    /// `None` unless both halves are on disk
    pub fn load(&self, label: &str) -> Result<Option<Keypair>> {
        let (private_path, public_path) = self.key_paths(label);
        if !private_path.is_file() || !public_path.is_file() {
            return Ok(None);
        }

        let private_pem = Zeroizing::new(fs::read_to_string(&private_path)?);
        let public_pem = fs::read_to_string(&public_path)?;
        Ok(Some(Keypair::from_pems(private_pem, public_pem)))
    }

    /// Cached keypair for `secret` if it is intact, otherwise derive and cache
    pub fn load_or_derive(&self, secret: &str, bits: usize) -> Result<Keypair> {
        let version = DerivationVersion::default();
        let strength = KeyStrength::try_from(bits)?;
        let label = cache_label(secret, strength, version)?;

        match self.load(&label) {
            Ok(Some(keypair)) if keypair.is_consistent() => {
                debug!(label = %label, "using cached keypair");
                return Ok(keypair);
            }
            Ok(Some(_)) => warn!(label = %label, "cached keypair does not match itself, re-deriving"),
            Ok(None) => {}
            Err(err) => warn!(label = %label, error = %err, "cached keypair unreadable, re-deriving"),
        }

        let keypair = derive_keypair_versioned(secret, strength.bits(), version)?;
        if let Err(err) = self.store(&label, &keypair) {
            warn!(dir = %self.dir.display(), error = %err, "could not cache keypair");
        }
        Ok(keypair)
    }
}

/// File label for a secret: `<version>_<16 hex of BLAKE3 derive-key(seed)>_<bits>`
///
/// One-way in the seed, so the file name does not leak the secret.
pub fn cache_label(secret: &str, strength: KeyStrength, version: DerivationVersion) -> Result<String> {
    let seed = derive_seed(secret, version)?;
    let digest = blake3::Hash::from(blake3::derive_key(CACHE_LABEL_CONTEXT, seed.as_slice()));
    let hex = digest.to_hex();
    Ok(format!(
        "{}_{}_{}",
        version.as_str(),
        &hex.as_str()[..16],
        strength.bits()
    ))
}

fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on create; an existing file keeps its old bits
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents.as_bytes())?;
    file.flush()
}
