//! Core game primitives.
//!
//! Dice and die sets, the commit-then-reveal fairness protocol, and the
//! exhaustive win-probability engine. Everything here is free of
//! interactive I/O; the `game` module drives these types from its prompt
//! loop.

pub mod dice;
pub mod fairness;
pub mod probability;

// Re-export core types
pub use dice::{Die, DieSet, FACES, MIN_DICE};
pub use fairness::{CommitmentDigest, FairCommitment, KEY_LEN};
pub use probability::{BeatStats, ProbabilityMatrix};
