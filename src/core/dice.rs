//! Dice Definitions
//!
//! A die is exactly 6 integer faces, fixed at construction. A die set is
//! at least 3 dice. Both are immutable for the lifetime of a game run;
//! every later phase of the protocol borrows them read-only.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Number of faces on every die.
pub const FACES: usize = 6;

/// Minimum number of dice in a playable set.
pub const MIN_DICE: usize = 3;

/// A six-faced die with arbitrary integer face values.
///
/// Face order matters: the roll protocol indexes faces by the combined
/// modular result, so `[1,2,3,4,5,6]` and `[6,5,4,3,2,1]` are distinct
/// dice even though they carry the same multiset of values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    faces: [i32; FACES],
}

impl Die {
    /// Create a die from exactly 6 faces.
    pub const fn new(faces: [i32; FACES]) -> Self {
        Self { faces }
    }

    /// Parse a die from a comma-separated specification like `2,2,4,4,9,9`.
    ///
    /// `index` is the die's position in the argument list, used only for
    /// the error diagnostic.
    pub fn parse(index: usize, spec: &str) -> Result<Self> {
        let malformed = || GameError::MalformedDie {
            index,
            spec: spec.to_string(),
        };

        let values: Vec<i32> = spec
            .split(',')
            .map(|tok| tok.trim().parse::<i32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| malformed())?;

        let faces: [i32; FACES] = values.try_into().map_err(|_| malformed())?;
        Ok(Self::new(faces))
    }

    /// All faces in declaration order.
    pub fn faces(&self) -> &[i32; FACES] {
        &self.faces
    }

    /// Face value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 6`. Roll results are always reduced mod 6
    /// before indexing.
    pub fn face(&self, index: usize) -> i32 {
        self.faces[index]
    }

    /// Render as `a,b,c,d,e,f` for menus and table headers.
    pub fn label(&self) -> String {
        self.faces
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// An ordered, immutable collection of at least 3 dice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieSet {
    dice: Vec<Die>,
}

impl DieSet {
    /// Create a set, rejecting fewer than 3 dice.
    pub fn new(dice: Vec<Die>) -> Result<Self> {
        if dice.len() < MIN_DICE {
            return Err(GameError::InsufficientDice { got: dice.len() });
        }
        Ok(Self { dice })
    }

    /// Parse a set from raw argument tokens, one die spec per token.
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        if specs.len() < MIN_DICE {
            return Err(GameError::InsufficientDice { got: specs.len() });
        }
        let dice = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Die::parse(i, spec.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(dice)
    }

    /// Number of dice in the set.
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    /// True if the set holds no dice. Unreachable after construction,
    /// provided for the usual `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Die at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    /// Iterate over the dice in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }
}
