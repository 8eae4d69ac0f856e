//! Error Taxonomy
//!
//! Fatal errors only. Malformed prompt input is handled inside the prompt
//! loop by re-prompting and never surfaces here; a user-requested exit is
//! a normal `Outcome::Aborted`, not an error.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors that terminate a game run.
#[derive(Debug, Error)]
pub enum GameError {
    /// Fewer than three dice were supplied.
    #[error("at least 3 dice are required, got {got}")]
    InsufficientDice {
        /// Number of dice actually supplied.
        got: usize,
    },

    /// A die specification did not yield exactly 6 integer faces.
    #[error("die {index} must be exactly 6 comma-separated integers, got \"{spec}\"")]
    MalformedDie {
        /// Zero-based position of the offending die in the argument list.
        index: usize,
        /// The raw specification as supplied.
        spec: String,
    },

    /// A commitment was requested over an empty range.
    ///
    /// Indicates a programming defect in the caller, not bad user input.
    #[error("commitment range must be at least 1, got {range}")]
    InvalidRange {
        /// The rejected exclusive upper bound.
        range: u32,
    },

    /// The prompt stream failed (stdin closed, write error).
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
