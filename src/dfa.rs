//! The DFA description produced by subset construction.

use bincode::{Decode, Encode};
use rustc_hash::FxHashMap as HashMap;
use std::fmt;

/// A DFA state: the set of NFA states it stands for.
///
/// Members are kept sorted and deduplicated, so two subset-states are equal
/// exactly when they hold the same NFA states. The empty subset-state is the
/// destination of a "no transition" entry and is never a DFA state itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub struct SubsetState(Vec<String>);

impl SubsetState {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members: Vec<String> = members.into_iter().map(Into::into).collect();
        members.sort_unstable();
        members.dedup();
        Self(members)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, state: &str) -> bool {
        self.0.binary_search_by(|m| m.as_str().cmp(state)).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Members joined by `,`; the empty subset-state renders as an empty string.
impl fmt::Display for SubsetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

/// All outgoing transitions of one DFA state, in alphabet order.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct TransitionRow {
    pub state: SubsetState,
    pub transitions: Vec<(String, SubsetState)>,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct Dfa {
    alphabet: Vec<String>,
    start_state: SubsetState,
    states: Vec<SubsetState>,
    accepting_states: Vec<SubsetState>,
    rows: Vec<TransitionRow>,
    row_index: HashMap<SubsetState, usize>,
}

impl Dfa {
    pub(crate) fn new(
        alphabet: Vec<String>,
        start_state: SubsetState,
        states: Vec<SubsetState>,
        accepting_states: Vec<SubsetState>,
        rows: Vec<TransitionRow>,
    ) -> Self {
        let row_index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.state.clone(), i))
            .collect();
        Self {
            alphabet,
            start_state,
            states,
            accepting_states,
            rows,
            row_index,
        }
    }

    pub fn get_alphabet(&self) -> &[String] {
        &self.alphabet
    }

    pub fn get_start_state(&self) -> &SubsetState {
        &self.start_state
    }

    pub fn is_start_state(&self, state: &SubsetState) -> bool {
        *state == self.start_state
    }

    /// DFA states in discovery order, the start state first.
    pub fn get_states(&self) -> &[SubsetState] {
        &self.states
    }

    pub fn get_accepting_states(&self) -> &[SubsetState] {
        &self.accepting_states
    }

    pub fn is_accepting_state(&self, state: &SubsetState) -> bool {
        self.accepting_states.contains(state)
    }

    /// Transition rows in the order the states were processed.
    pub fn get_transitions(&self) -> &[TransitionRow] {
        &self.rows
    }

    /// Every `(state, symbol, next state)` entry, including entries whose
    /// destination is the empty subset-state.
    pub fn transition_entries(
        &self,
    ) -> impl Iterator<Item = (&SubsetState, &str, &SubsetState)> + '_ {
        self.rows.iter().flat_map(|row| {
            row.transitions
                .iter()
                .map(move |(symbol, next)| (&row.state, symbol.as_str(), next))
        })
    }

    /// The state reached from `state` on `symbol`, if there is one.
    pub fn next_state(&self, state: &SubsetState, symbol: &str) -> Option<&SubsetState> {
        let row = &self.rows[*self.row_index.get(state)?];
        row.transitions
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, next)| next)
            .filter(|next| !next.is_empty())
    }

    /// States visited while reading `inputs` from the start state, or `None`
    /// when some symbol has no transition.
    pub fn get_state_sequence<I, S>(&self, inputs: I) -> Option<Vec<&SubsetState>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = &self.start_state;
        let mut seq = vec![state];
        for input in inputs {
            state = self.next_state(state, input.as_ref())?;
            seq.push(state);
        }
        Some(seq)
    }

    pub fn accepts<I, S>(&self, inputs: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.get_state_sequence(inputs)
            .and_then(|seq| seq.last().copied())
            .is_some_and(|last| self.is_accepting_state(last))
    }
}

/// The transition table, laid out as `State / Symbol / Next State` columns.
impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |states: &[SubsetState]| -> Vec<String> {
            states.iter().map(ToString::to_string).collect()
        };
        writeln!(f, "DFA States: {:?}", names(&self.states))?;
        writeln!(f, "DFA Accepting States: {:?}", names(&self.accepting_states))?;
        writeln!(f, "DFA Transitions:")?;
        writeln!(f, "{:<15} {:<10} Next State", "State", "Symbol")?;
        writeln!(f, "{}", "-".repeat(35))?;
        for (state, symbol, next) in self.transition_entries() {
            let next = if next.is_empty() {
                "∅".to_string()
            } else {
                next.to_string()
            };
            writeln!(f, "{:<15} {:<10} {}", state.to_string(), symbol, next)?;
        }
        Ok(())
    }
}
