//! Fair Random Draw Protocol
//!
//! Commit-then-reveal random generation. The host draws a secret uniform
//! value and a fresh 256-bit key, publishes a keyed digest of the value,
//! and only reveals the value and key after the counterpart has committed
//! to its own guess or contribution. Recomputing the digest from the
//! revealed pair proves the host did not change its value after the fact.
//!
//! The digest is domain-separated SHA-256 over the key followed by the
//! decimal rendering of the value. Without the key the digest reveals
//! nothing practical about a value drawn from a tiny range; with it,
//! verification is a deterministic recomputation.

use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{GameError, Result};

/// Domain separator for draw commitments.
const COMMITMENT_DOMAIN: &[u8] = b"FAIRDICE_DRAW_V1";

/// Length of the secret key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Digest output type (256 bits / 32 bytes).
pub type CommitmentDigest = [u8; 32];

/// A single fair draw: secret value, secret key, public digest.
///
/// One commitment backs exactly one protocol draw. Keys are never reused
/// across draws; an aborted run simply drops the commitment without
/// revealing the key, which preserves the hiding guarantee.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FairCommitment {
    value: u32,
    key: [u8; KEY_LEN],
    digest: CommitmentDigest,
}

impl FairCommitment {
    /// Open a commitment over the uniform range `[0, range)`.
    ///
    /// The value and the key are both drawn from the operating system's
    /// CSPRNG. Fails with `InvalidRange` when the range is empty.
    pub fn commit(range: u32) -> Result<Self> {
        if range < 1 {
            return Err(GameError::InvalidRange { range });
        }

        let value = OsRng.gen_range(0..range);
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);

        let digest = compute_digest(&key, value);
        Ok(Self { value, key, digest })
    }

    /// The public digest. Safe to publish before the counterpart commits.
    pub fn digest(&self) -> &CommitmentDigest {
        &self.digest
    }

    /// Reveal the secret pair `(value, key)`.
    ///
    /// Call only after the counterpart has made its guess or contribution;
    /// once revealed, the commitment is spent.
    pub fn reveal(&self) -> (u32, &[u8; KEY_LEN]) {
        (self.value, &self.key)
    }

    /// Recompute the digest for a revealed `(key, value)` pair.
    ///
    /// Deterministic: the result matches the originally published digest
    /// if and only if the pair is the one committed to.
    pub fn verify(key: &[u8; KEY_LEN], value: u32) -> CommitmentDigest {
        compute_digest(key, value)
    }

    /// Check this commitment against its own secrets.
    ///
    /// Always true for a well-formed commitment; exposed so a run can
    /// demonstrate verification at reveal time.
    pub fn self_check(&self) -> bool {
        Self::verify(&self.key, self.value) == self.digest
    }
}

/// Keyed digest of a draw value.
fn compute_digest(key: &[u8; KEY_LEN], value: u32) -> CommitmentDigest {
    let mut hasher = Sha256::new();
    hasher.update(COMMITMENT_DOMAIN);
    hasher.update(key);
    hasher.update(value.to_string().as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_commit_rejects_empty_range() {
        assert!(matches!(
            FairCommitment::commit(0),
            Err(GameError::InvalidRange { range: 0 })
        ));
    }

    #[test]
    fn test_degenerate_range_is_well_defined() {
        let c = FairCommitment::commit(1).unwrap();
        assert_eq!(c.reveal().0, 0);
        assert!(c.self_check());
    }

    #[test]
    fn test_round_trip() {
        let c = FairCommitment::commit(6).unwrap();
        let (value, key) = c.reveal();
        assert!(value < 6);
        assert_eq!(FairCommitment::verify(key, value), *c.digest());
    }

    #[test]
    fn test_verify_is_deterministic() {
        let key = [7u8; KEY_LEN];
        assert_eq!(
            FairCommitment::verify(&key, 3),
            FairCommitment::verify(&key, 3)
        );
    }

    #[test]
    fn test_binding_wrong_value_mismatches() {
        let c = FairCommitment::commit(6).unwrap();
        let (value, key) = c.reveal();
        let other = (value + 1) % 6;
        assert_ne!(FairCommitment::verify(key, other), *c.digest());
    }

    #[test]
    fn test_hiding_digest_depends_on_key() {
        // Same value under two keys must not collide, otherwise the digest
        // would leak the value to anyone who can enumerate the range.
        let a = FairCommitment::verify(&[1u8; KEY_LEN], 4);
        let b = FairCommitment::verify(&[2u8; KEY_LEN], 4);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fresh_keys_per_commitment() {
        let a = FairCommitment::commit(2).unwrap();
        let b = FairCommitment::commit(2).unwrap();
        assert_ne!(a.reveal().1, b.reveal().1);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_values_cover_range() {
        // 200 draws over [0,2) should produce both values. The chance of
        // this failing with a uniform source is 2^-199.
        let mut seen = [false; 2];
        for _ in 0..200 {
            let c = FairCommitment::commit(2).unwrap();
            seen[c.reveal().0 as usize] = true;
        }
        assert_eq!(seen, [true, true]);
    }

    proptest! {
        #[test]
        fn prop_round_trip_all_small_ranges(range in 1u32..=64) {
            let c = FairCommitment::commit(range).unwrap();
            let (value, key) = c.reveal();
            prop_assert!(value < range);
            prop_assert_eq!(FairCommitment::verify(key, value), *c.digest());
        }
    }
}
