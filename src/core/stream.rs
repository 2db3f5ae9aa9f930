// src/core/stream.rs
//! Deterministic byte stream used as the only randomness source for RSA
//! key generation.
//!
//! Block `i` is `SHA-256(seed || be64(i) || "/stream")`. Blocks are
//! concatenated and handed out strictly left to right; a partially consumed
//! block is kept for the next read, so the Nth byte ever produced depends
//! only on the seed and N.
//!
//! This is not a standards-certified DRBG. Determinism is the point.

use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::consts::{SEED_LEN, STREAM_BLOCK_LEN, V1_STREAM_LABEL};
use crate::error::CoreError;

pub struct DeterministicStream {
    seed: Zeroizing<[u8; SEED_LEN]>,
    counter: u64,
    block: Zeroizing<[u8; STREAM_BLOCK_LEN]>,
    // bytes of `block` already handed out; STREAM_BLOCK_LEN means empty
    offset: usize,
    consumed: u64,
    limit: Option<u64>,
    exhausted: bool,
}

impl DeterministicStream {
    /// Unbounded stream over `seed`
    pub fn new(seed: &[u8; SEED_LEN]) -> Self {
        Self {
            seed: Zeroizing::new(*seed),
            counter: 0,
            block: Zeroizing::new([0u8; STREAM_BLOCK_LEN]),
            offset: STREAM_BLOCK_LEN,
            consumed: 0,
            limit: None,
            exhausted: false,
        }
    }

    /// Stream that reports exhaustion once more than `max_bytes` are read
    pub fn with_limit(seed: &[u8; SEED_LEN], max_bytes: u64) -> Self {
        Self {
            limit: Some(max_bytes),
            ..Self::new(seed)
        }
    }

    /// Total bytes handed out so far
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// True once a read went past the budget or the counter wrapped.
    ///
    /// Output produced after that point must be discarded.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fill `out` with the next bytes of the stream.
    ///
    /// Errors when the read runs past the budget. The bytes are still
    /// written and the cursor still advances; the stream stays exhausted.
    pub fn read(&mut self, out: &mut [u8]) -> Result<(), CoreError> {
        let mut written = 0;
        while written < out.len() {
            if self.offset == STREAM_BLOCK_LEN {
                self.refill();
            }
            let take = (STREAM_BLOCK_LEN - self.offset).min(out.len() - written);
            out[written..written + take]
                .copy_from_slice(&self.block[self.offset..self.offset + take]);
            self.offset += take;
            written += take;
        }

        self.consumed = self.consumed.saturating_add(out.len() as u64);
        if let Some(limit) = self.limit {
            if self.consumed > limit {
                self.exhausted = true;
            }
        }

        if self.exhausted {
            return Err(CoreError::StreamExhausted {
                consumed: self.consumed,
            });
        }
        Ok(())
    }

    fn refill(&mut self) {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.as_slice());
        hasher.update(self.counter.to_be_bytes());
        hasher.update(V1_STREAM_LABEL);
        self.block.copy_from_slice(&hasher.finalize());
        self.offset = 0;

        match self.counter.checked_add(1) {
            Some(next) => self.counter = next,
            None => {
                // 2^64 blocks: keep producing so callers terminate, never succeed
                self.exhausted = true;
                self.counter = 0;
            }
        }
    }
}

impl RngCore for DeterministicStream {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        // Exhaustion is sticky and checked by the derivation afterwards
        let _ = self.read(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.read(dest).map_err(rand::Error::new)
    }
}

// Marker only: output is as strong as the secrecy of the seed
impl CryptoRng for DeterministicStream {}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; SEED_LEN] = [0x5a; SEED_LEN];

    #[test]
    fn same_seed_same_bytes() {
        let mut a = DeterministicStream::new(&SEED);
        let mut b = DeterministicStream::new(&SEED);
        let mut out_a = [0u8; 100];
        let mut out_b = [0u8; 100];
        a.read(&mut out_a).unwrap();
        b.read(&mut out_b).unwrap();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn chunking_does_not_change_output() {
        let mut whole = DeterministicStream::new(&SEED);
        let mut expected = [0u8; 97];
        whole.read(&mut expected).unwrap();

        let mut pieces = DeterministicStream::new(&SEED);
        let mut got = Vec::new();
        for size in [1usize, 7, 31, 32, 26] {
            let mut buf = vec![0u8; size];
            pieces.read(&mut buf).unwrap();
            got.extend_from_slice(&buf);
        }
        assert_eq!(got.as_slice(), expected.as_slice());
        assert_eq!(pieces.consumed(), 97);
    }

    #[test]
    fn first_block_matches_construction() {
        let mut stream = DeterministicStream::new(&SEED);
        let mut out = [0u8; STREAM_BLOCK_LEN];
        stream.read(&mut out).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(SEED);
        hasher.update(0u64.to_be_bytes());
        hasher.update(V1_STREAM_LABEL);
        assert_eq!(out.as_slice(), hasher.finalize().as_slice());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = DeterministicStream::new(&SEED);
        let mut b = DeterministicStream::new(&[0xa5; SEED_LEN]);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn limit_marks_exhaustion() {
        let mut stream = DeterministicStream::with_limit(&SEED, 40);
        let mut buf = [0u8; 32];
        assert!(stream.read(&mut buf).is_ok());
        assert!(!stream.is_exhausted());

        let err = stream.read(&mut buf).unwrap_err();
        assert!(matches!(err, CoreError::StreamExhausted { consumed: 64 }));
        assert!(stream.is_exhausted());

        // sticky, and try_fill_bytes reports it too
        assert!(stream.try_fill_bytes(&mut buf).is_err());
    }

    #[test]
    fn fill_bytes_keeps_producing_after_exhaustion() {
        let mut stream = DeterministicStream::with_limit(&SEED, 0);
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        stream.fill_bytes(&mut a);
        stream.fill_bytes(&mut b);
        assert!(stream.is_exhausted());
        assert_ne!(a, b);
    }
}
