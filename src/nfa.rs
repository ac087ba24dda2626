//! The NFA description consumed by subset construction.
//!
//! State and symbol names are interned when the [`Nfa`] is built: states get
//! dense [`StateId`]s in the order they are first mentioned (declared states
//! first), symbols get their position in the declared alphabet. Destinations
//! that were never declared are tolerated and interned like any other state.

use log::debug;
use rustc_hash::FxHashMap as HashMap;

use crate::error::DescriptionError;
use crate::state::{StateId, StateSet};
use crate::symbol::{is_epsilon, is_epsilon_label, SymbolId, EPSILON, EPSILON_LABEL};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Nfa {
    state_names: Vec<String>,
    state_ids: HashMap<String, StateId>,
    num_declared: usize,
    alphabet: Vec<String>,
    symbol_ids: HashMap<String, SymbolId>,
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    // keys of `transitions` in the order they were given
    transition_order: Vec<(StateId, SymbolId)>,
    initial_state: StateId,
    accepting_states: StateSet,
}

impl Nfa {
    pub fn builder() -> NfaBuilder {
        NfaBuilder::new()
    }

    /// The declared states, in declaration order.
    pub fn get_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.state_names[..self.num_declared]
            .iter()
            .map(String::as_str)
    }

    /// Number of interned states, declared or only referenced.
    pub fn num_states(&self) -> usize {
        self.state_names.len()
    }

    pub fn get_alphabet(&self) -> &[String] {
        &self.alphabet
    }

    pub fn get_initial_state(&self) -> &str {
        self.state_name(self.initial_state)
    }

    pub fn initial_state_id(&self) -> StateId {
        self.initial_state
    }

    pub fn get_accepting_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.accepting_states
            .iter()
            .map(move |id| self.state_name(id))
    }

    pub fn accepting_state_set(&self) -> &StateSet {
        &self.accepting_states
    }

    pub fn is_accepting_state(&self, state: StateId) -> bool {
        self.accepting_states.contains(state)
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_ids.get(name).copied()
    }

    /// # Panics
    ///
    /// Panics if `state` was not produced by this NFA.
    pub fn state_name(&self, state: StateId) -> &str {
        &self.state_names[state as usize]
    }

    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        if is_epsilon_label(name) {
            return Some(EPSILON);
        }
        self.symbol_ids.get(name).copied()
    }

    /// # Panics
    ///
    /// Panics if `symbol` is neither [`EPSILON`] nor a symbol of this NFA's
    /// alphabet.
    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        if is_epsilon(symbol) {
            EPSILON_LABEL
        } else {
            &self.alphabet[symbol as usize]
        }
    }

    /// Build a state set from names. Names this NFA never mentions are skipped.
    pub fn state_set<I, S>(&self, names: I) -> StateSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = StateSet::with_capacity(self.num_states());
        set.extend(
            names
                .into_iter()
                .filter_map(|name| self.state_id(name.as_ref())),
        );
        set
    }

    /// Destinations of `state` on `symbol` (which may be [`EPSILON`]).
    pub fn destinations(&self, state: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    /// All transitions in the order they were described, one item per
    /// `(source, symbol)` pair.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, &StateSet)> + '_ {
        self.transition_order
            .iter()
            .map(move |&(src, sym)| (src, sym, &self.transitions[&(src, sym)]))
    }

    /// The smallest superset of `states` closed under epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().collect();

        while let Some(state) = stack.pop() {
            if let Some(destinations) = self.transitions.get(&(state, EPSILON)) {
                for next in destinations.iter() {
                    if closure.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }

        closure
    }

    /// States reachable from `states` by exactly one `symbol` transition.
    ///
    /// The result is not epsilon-closed.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        debug_assert!(!is_epsilon(symbol), "use epsilon_closure for epsilon moves");

        let mut reached = StateSet::with_capacity(self.num_states());
        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }
        reached
    }

    /// Simulate the NFA directly on a sequence of alphabet symbols.
    ///
    /// A symbol outside the alphabet rejects the input.
    pub fn accepts<I, S>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current =
            self.epsilon_closure(&StateSet::singleton(self.initial_state, self.num_states()));
        for symbol in input {
            let symbol = match self.symbol_ids.get(symbol.as_ref()) {
                Some(&id) => id,
                None => return false,
            };
            current = self.epsilon_closure(&self.move_on_symbol(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }
        current.intersects(&self.accepting_states)
    }
}

/// Validating builder for [`Nfa`].
///
/// ```
/// use subset_dfa::Nfa;
///
/// let nfa = Nfa::builder()
///     .states(["q0", "q1"])
///     .alphabet(["a"])
///     .transition("q0", "a", ["q1"])
///     .initial_state("q0")
///     .accepting_states(["q1"])
///     .build()
///     .unwrap();
/// assert!(nfa.accepts(["a"]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NfaBuilder {
    states: Vec<String>,
    alphabet: Vec<String>,
    transitions: Vec<(String, String, Vec<String>)>,
    initial_state: Option<String>,
    accepting_states: Vec<String>,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Add the transitions `from --symbol--> d` for every `d` in `to`.
    /// `symbol` may be `"ε"` (or empty) for an epsilon transition.
    pub fn transition<I, S>(
        mut self,
        from: impl Into<String>,
        symbol: impl Into<String>,
        to: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transitions.push((
            from.into(),
            symbol.into(),
            to.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn epsilon<I, S>(self, from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transition(from, EPSILON_LABEL, to)
    }

    pub fn initial_state(mut self, state: impl Into<String>) -> Self {
        self.initial_state = Some(state.into());
        self
    }

    pub fn accepting_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepting_states
            .extend(states.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Nfa> {
        let mut interner = Interner::default();

        for state in &self.states {
            if interner.ids.contains_key(state) {
                return Err(DescriptionError::DuplicateState(state.clone()).into());
            }
            interner.intern(state);
        }
        let num_declared = interner.names.len();

        let mut symbol_ids: HashMap<String, SymbolId> = HashMap::default();
        for symbol in &self.alphabet {
            if is_epsilon_label(symbol) {
                return Err(DescriptionError::EpsilonInAlphabet.into());
            }
            let next_id = symbol_ids.len() as SymbolId;
            if symbol_ids.insert(symbol.clone(), next_id).is_some() {
                return Err(DescriptionError::DuplicateSymbol(symbol.clone()).into());
            }
        }

        let initial_name = self
            .initial_state
            .ok_or(DescriptionError::MissingInitialState)?;
        let initial_state = interner.intern(&initial_name);

        let mut transitions: HashMap<(StateId, SymbolId), StateSet> = HashMap::default();
        let mut transition_order = Vec::new();
        for (from, symbol, to) in &self.transitions {
            let symbol_id = if is_epsilon_label(symbol) {
                EPSILON
            } else {
                *symbol_ids
                    .get(symbol)
                    .ok_or_else(|| DescriptionError::UndeclaredSymbol {
                        state: from.clone(),
                        symbol: symbol.clone(),
                    })?
            };
            let source = interner.intern(from);
            if transitions.contains_key(&(source, symbol_id)) {
                return Err(DescriptionError::DuplicateTransition {
                    state: from.clone(),
                    symbol: symbol.clone(),
                }
                .into());
            }
            let destinations: StateSet = to.iter().map(|d| interner.intern(d)).collect();
            transitions.insert((source, symbol_id), destinations);
            transition_order.push((source, symbol_id));
        }

        let accepting_states: StateSet = self
            .accepting_states
            .iter()
            .map(|s| interner.intern(s))
            .collect();

        debug!(
            "built NFA with {} states ({} declared), {} symbols, {} transition entries",
            interner.names.len(),
            num_declared,
            self.alphabet.len(),
            transition_order.len()
        );

        Ok(Nfa {
            state_names: interner.names,
            state_ids: interner.ids,
            num_declared,
            alphabet: self.alphabet,
            symbol_ids,
            transitions,
            transition_order,
            initial_state,
            accepting_states,
        })
    }
}

#[derive(Default)]
struct Interner {
    names: Vec<String>,
    ids: HashMap<String, StateId>,
}

impl Interner {
    fn intern(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as StateId;
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn chain() -> Nfa {
        // q0 -ε-> q1 -ε-> q2 -a-> q3, q3 -ε-> q0
        Nfa::builder()
            .states(["q0", "q1", "q2", "q3"])
            .alphabet(["a"])
            .epsilon("q0", ["q1"])
            .epsilon("q1", ["q2"])
            .transition("q2", "a", ["q3"])
            .epsilon("q3", ["q0"])
            .initial_state("q0")
            .accepting_states(["q3"])
            .build()
            .unwrap()
    }

    #[test]
    fn epsilon_closure_is_transitive() {
        let nfa = chain();
        let closure = nfa.epsilon_closure(&nfa.state_set(["q0"]));
        assert_eq!(closure, nfa.state_set(["q0", "q1", "q2"]));

        let closure = nfa.epsilon_closure(&nfa.state_set(["q3"]));
        assert_eq!(closure, nfa.state_set(["q0", "q1", "q2", "q3"]));
    }

    #[test]
    fn epsilon_closure_of_state_without_transitions() {
        let nfa = Nfa::builder()
            .states(["lonely", "other"])
            .initial_state("lonely")
            .build()
            .unwrap();
        let set = nfa.state_set(["other"]);
        assert_eq!(nfa.epsilon_closure(&set), set);
        assert!(nfa.epsilon_closure(&StateSet::default()).is_empty());
    }

    #[test]
    fn move_does_not_close() {
        let nfa = chain();
        let a = nfa.symbol_id("a").unwrap();
        let moved = nfa.move_on_symbol(&nfa.state_set(["q0", "q1", "q2"]), a);
        assert_eq!(moved, nfa.state_set(["q3"]));
        assert!(nfa.move_on_symbol(&nfa.state_set(["q3"]), a).is_empty());
    }

    #[test]
    fn undeclared_destinations_are_interned() {
        let nfa = Nfa::builder()
            .states(["q0"])
            .alphabet(["x"])
            .transition("q0", "x", ["elsewhere"])
            .initial_state("q0")
            .accepting_states(["elsewhere"])
            .build()
            .unwrap();
        assert_eq!(nfa.get_states().collect::<Vec<_>>(), vec!["q0"]);
        assert_eq!(nfa.num_states(), 2);
        assert!(nfa.accepts(["x"]));
        assert!(!nfa.accepts(["x", "x"]));
        assert!(!nfa.accepts(["y"]));
    }

    #[test]
    fn transitions_keep_description_order() {
        let nfa = chain();
        let listed: Vec<(&str, &str)> = nfa
            .transitions()
            .map(|(src, sym, _)| (nfa.state_name(src), nfa.symbol_name(sym)))
            .collect();
        assert_eq!(
            listed,
            vec![("q0", "ε"), ("q1", "ε"), ("q2", "a"), ("q3", "ε")]
        );
    }

    #[test]
    fn symbol_names() {
        let nfa = chain();
        assert_eq!(nfa.symbol_name(EPSILON), "ε");
        assert_eq!(nfa.symbol_name(nfa.symbol_id("a").unwrap()), "a");
        assert_eq!(nfa.symbol_id(""), Some(EPSILON));
        assert_eq!(nfa.symbol_id("b"), None);
    }

    #[test]
    #[should_panic]
    fn symbol_name_outside_the_alphabet() {
        chain().symbol_name(1);
    }

    #[test]
    fn invalid_descriptions() {
        let err = Nfa::builder().states(["q0"]).build().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidAutomatonDescription(DescriptionError::MissingInitialState)
        );
        assert!(err.is_invalid_description());

        let err = Nfa::builder()
            .states(["q0", "q0"])
            .initial_state("q0")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::from(DescriptionError::DuplicateState("q0".to_string()))
        );

        let err = Nfa::builder()
            .alphabet(["a", "ε"])
            .initial_state("q0")
            .build()
            .unwrap_err();
        assert_eq!(err, Error::from(DescriptionError::EpsilonInAlphabet));

        let err = Nfa::builder()
            .alphabet(["a", "a"])
            .initial_state("q0")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::from(DescriptionError::DuplicateSymbol("a".to_string()))
        );

        let err = Nfa::builder()
            .alphabet(["a"])
            .transition("q0", "b", ["q0"])
            .initial_state("q0")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::from(DescriptionError::UndeclaredSymbol {
                state: "q0".to_string(),
                symbol: "b".to_string()
            })
        );

        let err = Nfa::builder()
            .alphabet(["a"])
            .transition("q0", "a", ["q0"])
            .transition("q0", "a", ["q1"])
            .initial_state("q0")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::from(DescriptionError::DuplicateTransition {
                state: "q0".to_string(),
                symbol: "a".to_string()
            })
        );
    }
}
