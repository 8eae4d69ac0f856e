//! Game Protocol Module
//!
//! The interactive state machine that turns the core primitives into a
//! playable run: first-move commitment, dice selection, two independent
//! commit-reveal rolls, final comparison.

pub mod protocol;

// Re-export key types
pub use protocol::{
    GameSession, HostPolicy, Outcome, Phase, Player, Resolution, Winner, EXIT_ACK,
};
