//! Symbol types for automata transitions.

/// Index of a symbol in the NFA's declared alphabet.
pub type SymbolId = u32;

/// Reserved symbol id for epsilon (empty) transitions. Never an alphabet index.
pub const EPSILON: SymbolId = u32::MAX;

/// How epsilon is written in descriptions and rendered graphs.
pub const EPSILON_LABEL: &str = "ε";

#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// Whether a textual symbol label denotes epsilon. An empty label counts too.
#[inline]
pub fn is_epsilon_label(label: &str) -> bool {
    label.is_empty() || label == EPSILON_LABEL
}
