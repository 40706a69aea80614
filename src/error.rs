//! Error family shared by all automata.

use thiserror::Error;

/// Result alias for automaton operations.
pub type Result<T> = std::result::Result<T, AutomatonError>;

/// Errors raised by construction, validation, and recognition.
///
/// Construction and validation fail on the first invariant violation;
/// no partially-built automaton escapes. Recognition raises only the
/// [`Rejection`](AutomatonError::Rejection) kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// A referenced state is not in the state set.
    #[error("{0}")]
    InvalidState(String),

    /// A state has no transition entry, or the initial state has none.
    #[error("{0}")]
    MissingState(String),

    /// A transition key is outside the input symbol set.
    #[error("{0}")]
    InvalidSymbol(String),

    /// A (state, symbol) pair required by totality is missing.
    #[error("{0}")]
    MissingSymbol(String),

    /// The initial state fails some required condition.
    #[error("{0}")]
    InitialState(String),

    /// A final state fails some required condition.
    #[error("{0}")]
    FinalState(String),

    /// The input word is not in the automaton's language.
    #[error("{0}")]
    Rejection(String),

    /// A required operation has not been supplied.
    #[error("{0} is not implemented")]
    NotImplemented(String),
}

impl AutomatonError {
    /// True for the Rejection family, which `accepts_input` converts to
    /// a boolean; structural errors are never caught this way.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AutomatonError::Rejection(_))
    }
}
