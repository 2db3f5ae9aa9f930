// src/core/envelope.rs
//! Envelope wire formats
//!
//! ```text
//! Legacy:  base64(rsa_oaep_sha256(plaintext))
//! Hybrid:  {"alg":"RSA-OAEP+AES-GCM","ek":b64,"iv":b64,"ct":b64(body||tag)}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::HYBRID_ALG;
use crate::enums::EnvelopeFormat;

/// Fixed-shape hybrid record
///
/// Missing string fields deserialize as empty so that "absent" and "empty"
/// are rejected by the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridEnvelope {
    pub alg: String,
    #[serde(default)]
    pub ek: String,
    #[serde(default)]
    pub iv: String,
    #[serde(default)]
    pub ct: String,
}

/// Classified input, borrowed from the raw string in the legacy case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<'a> {
    Legacy(&'a str),
    Hybrid(HybridEnvelope),
}

/// The input carried the hybrid tag but the record could not be read
#[derive(Debug)]
pub struct MalformedHybrid(pub serde_json::Error);

impl<'a> Envelope<'a> {
    /// Decide which path an input takes.
    ///
    /// Anything that is not a JSON object with the exact hybrid tag is
    /// legacy, including unrelated JSON objects.
    pub fn classify(raw: &'a str) -> Result<Self, MalformedHybrid> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => return Ok(Envelope::Legacy(raw)),
        };

        let tagged = value
            .as_object()
            .and_then(|obj| obj.get("alg"))
            .and_then(Value::as_str)
            == Some(HYBRID_ALG);
        if !tagged {
            return Ok(Envelope::Legacy(raw));
        }

        serde_json::from_value(value)
            .map(Envelope::Hybrid)
            .map_err(MalformedHybrid)
    }

    pub fn format(&self) -> EnvelopeFormat {
        match self {
            Envelope::Legacy(_) => EnvelopeFormat::Legacy,
            Envelope::Hybrid(_) => EnvelopeFormat::Hybrid,
        }
    }
}
