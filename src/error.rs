//! The Errors that may occur within the crate.
//!
//! Subset construction itself is total; only building an [`Nfa`](crate::Nfa)
//! from a description can fail.

use thiserror::Error;

pub type Result<T, E = crate::Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid automaton description: {0}")]
    InvalidAutomatonDescription(#[from] DescriptionError),
}

impl Error {
    pub fn is_invalid_description(&self) -> bool {
        matches!(self, Self::InvalidAutomatonDescription(_))
    }
}

/// What exactly is wrong with an automaton description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    // Structural errors
    #[error("no initial state was given")]
    MissingInitialState,
    #[error("state {0:?} is declared more than once")]
    DuplicateState(String),
    #[error("symbol {0:?} is declared more than once")]
    DuplicateSymbol(String),
    #[error("the epsilon symbol cannot be part of the alphabet")]
    EpsilonInAlphabet,
    #[error("transition from state {state:?} uses symbol {symbol:?} which is not in the alphabet")]
    UndeclaredSymbol { state: String, symbol: String },
    #[error("transitions from state {state:?} on symbol {symbol:?} are given more than once")]
    DuplicateTransition { state: String, symbol: String },
    #[error("malformed transition {0:?}, expected 'symbol:state1,state2'")]
    MalformedTransition(String),
    // Textual format errors
    #[error("line {line}: unknown directive {directive:?}")]
    UnknownDirective { line: usize, directive: String },
    #[error("line {line}: directive {directive:?} may only appear once")]
    DuplicateDirective { line: usize, directive: String },
    #[error("line {line}: directive {directive:?} needs at least one argument")]
    MissingArgument { line: usize, directive: String },
    #[error("line {line}: exactly one initial state is allowed")]
    TooManyInitialStates { line: usize },
}

#[cfg(feature = "python-bindings")]
impl From<Error> for pyo3::PyErr {
    fn from(e: Error) -> Self {
        use pyo3::exceptions::PyValueError;
        use pyo3::PyErr;
        PyErr::new::<PyValueError, _>(e.to_string())
    }
}
