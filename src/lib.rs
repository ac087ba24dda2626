//! # Subset_DFA
//!
//! `subset_dfa` crate converts epsilon-NFAs into equivalent DFAs by subset
//! construction, then prunes states that cannot be reached from the start.
//!
//! ```
//! use subset_dfa::{convert, Nfa};
//!
//! let nfa: Nfa = "\
//! states q0 q1 q2
//! alphabet a b
//! transitions q0 a:q0,q1
//! transitions q1 b:q2
//! initial q0
//! accepting q2"
//!     .parse()
//!     .unwrap();
//! let dfa = convert(&nfa);
//! assert!(dfa.accepts(["a", "a", "b"]));
//! assert!(!dfa.accepts(["b"]));
//! ```

pub mod converter;
pub mod description;
pub mod dfa;
pub mod dot;
pub mod error;
pub mod nfa;
pub mod state;
pub mod symbol;

pub use converter::{convert, convert_all, Config, Converter, Exploration, Reachability};
pub use dfa::{Dfa, SubsetState, TransitionRow};
pub use error::{DescriptionError, Error, Result};
pub use nfa::{Nfa, NfaBuilder};
pub use state::{StateId, StateSet};
pub use symbol::{SymbolId, EPSILON, EPSILON_LABEL};

#[cfg(feature = "python-bindings")]
mod python_bindings;
