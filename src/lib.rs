//! # Fairdice
//!
//! Provably-fair two-player non-transitive dice game. The host's random
//! selections (first mover, both roll values) are made under a
//! commit-then-reveal protocol, so the guesser can verify after the fact
//! that nothing was chosen adversarially.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FAIRDICE                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/              - Protocol primitives                   │
//! │  ├── dice.rs        - Die / DieSet with invariants          │
//! │  ├── fairness.rs    - Commit-then-reveal fair draws         │
//! │  └── probability.rs - Exhaustive pairwise win odds          │
//! │                                                             │
//! │  game/              - Interactive protocol                  │
//! │  └── protocol.rs    - Phase machine, rolls, resolution      │
//! │                                                             │
//! │  cli/               - External collaborators                │
//! │  ├── args.rs        - Die specs and policy from argv        │
//! │  └── table.rs       - Probability table rendering           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fairness Guarantee
//!
//! Every random draw publishes a keyed SHA-256 digest of its value before
//! the user contributes anything, and reveals the value and the 256-bit
//! key afterwards. Recomputing the digest from the revealed pair must
//! reproduce the published digest bit-for-bit; a host that changes its
//! value after commitment cannot produce a matching key. Keys are fresh
//! per draw and an aborted run never discloses an unrevealed key.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod game;

// Re-export commonly used types
pub use crate::core::dice::{Die, DieSet};
pub use crate::core::fairness::FairCommitment;
pub use crate::core::probability::ProbabilityMatrix;
pub use error::{GameError, Result};
pub use game::protocol::{GameSession, HostPolicy, Outcome, Winner};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
