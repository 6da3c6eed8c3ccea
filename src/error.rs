//! Error types for the engine.
//!
//! All fallible public operations return `Result<_, EngineError>`. The
//! variants separate precondition violations (bad caller input) from
//! invalid operations (queries that are meaningless in the current state).

use std::fmt;

/// Errors surfaced by the public engine API.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The same card appears more than once among hole cards and board.
    DuplicateCards,
    /// More opponents were requested than the remaining deck can seat.
    TooManyOpponents {
        /// Opponents requested by the caller.
        requested: usize,
        /// Maximum the remaining deck supports.
        maximum: usize,
    },
    /// A board of 6+ cards (or otherwise malformed) was supplied.
    InvalidBoard(usize),
    /// Seat index outside the 9-handed table (0-8).
    InvalidPosition(usize),
    /// The deck has no undealt cards left.
    DeckExhausted,
    /// `best_action` (or a policy query) was made before any search ran.
    NoSearchPerformed,
    /// A search was created with no legal actions at the root.
    EmptyActionList,
    /// A configuration value is out of range.
    InvalidConfig(&'static str, f64),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DuplicateCards => {
                write!(f, "hole and board cards must be pairwise distinct")
            }
            EngineError::TooManyOpponents { requested, maximum } => {
                write!(
                    f,
                    "{} opponents requested but the remaining deck seats at most {}",
                    requested, maximum
                )
            }
            EngineError::InvalidBoard(n) => {
                write!(f, "board must hold 0-5 cards, got {}", n)
            }
            EngineError::InvalidPosition(p) => {
                write!(f, "position {} is outside the 9-handed table (0-8)", p)
            }
            EngineError::DeckExhausted => write!(f, "deal from an exhausted deck"),
            EngineError::NoSearchPerformed => {
                write!(f, "no search iterations have been run yet")
            }
            EngineError::EmptyActionList => {
                write!(f, "search root requires at least one legal action")
            }
            EngineError::InvalidConfig(name, val) => {
                write!(f, "config value {} = {} is out of range", name, val)
            }
        }
    }
}

impl std::error::Error for EngineError {}
