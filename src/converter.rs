//! Subset construction: turning an [`Nfa`] into an equivalent [`Dfa`].

use log::{debug, trace};
use rayon::prelude::*;
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

use crate::dfa::{Dfa, SubsetState, TransitionRow};
use crate::nfa::Nfa;
use crate::state::StateSet;
use crate::symbol::SymbolId;

/// Order in which newly discovered subset-states are processed.
///
/// Only the order of the produced states and table rows depends on this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Exploration {
    /// Process the most recently discovered subset-state first.
    #[default]
    DepthFirst,
    BreadthFirst,
}

/// How unreachable states are pruned after exploration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reachability {
    /// Keep what a traversal from the start state over non-empty
    /// transitions visits. "No transition" entries stay in the table.
    #[default]
    Traverse,
    /// Keep every entry whose subset-state shares a member with the union of
    /// all discovered subset-states. No discovered state is ever dropped this
    /// way, but "no transition" entries are removed from the table.
    MemberUniverse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    exploration: Exploration,
    reachability: Reachability,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exploration(mut self, exploration: Exploration) -> Self {
        self.exploration = exploration;
        self
    }

    pub fn reachability(mut self, reachability: Reachability) -> Self {
        self.reachability = reachability;
        self
    }

    pub fn get_exploration(&self) -> Exploration {
        self.exploration
    }

    pub fn get_reachability(&self) -> Reachability {
        self.reachability
    }
}

/// Converts one NFA. Each conversion owns its own worklist and tables.
#[derive(Debug, Clone)]
pub struct Converter<'a> {
    nfa: &'a Nfa,
    config: Config,
}

impl<'a> Converter<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            config: Config::default(),
        }
    }

    pub fn config() -> Config {
        Config::new()
    }

    pub fn configure(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn nfa(&self) -> &'a Nfa {
        self.nfa
    }

    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        self.nfa.epsilon_closure(states)
    }

    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        self.nfa.move_on_symbol(states, symbol)
    }

    pub fn convert(&self) -> Dfa {
        let nfa = self.nfa;
        debug!(
            "converting NFA with {} states over {} symbols ({:?}, {:?})",
            nfa.num_states(),
            nfa.get_alphabet().len(),
            self.config.exploration,
            self.config.reachability
        );
        let explored = self.explore();
        let kept = match self.config.reachability {
            Reachability::Traverse => explored.prune_by_traversal(),
            Reachability::MemberUniverse => explored.prune_by_member_universe(),
        };
        let dfa = kept.into_dfa(nfa);
        debug!(
            "DFA has {} states, {} accepting",
            dfa.get_states().len(),
            dfa.get_accepting_states().len()
        );
        dfa
    }

    fn explore(&self) -> Explored {
        let nfa = self.nfa;
        let num_symbols = nfa.get_alphabet().len() as SymbolId;

        let start = self.epsilon_closure(&StateSet::singleton(
            nfa.initial_state_id(),
            nfa.num_states(),
        ));
        let mut explored = Explored::default();
        explored.register(start);

        let mut worklist: VecDeque<usize> = VecDeque::from([0]);
        loop {
            let current = match self.config.exploration {
                Exploration::DepthFirst => worklist.pop_back(),
                Exploration::BreadthFirst => worklist.pop_front(),
            };
            let Some(current) = current else {
                break;
            };

            let mut row = Vec::with_capacity(num_symbols as usize);
            for symbol in 0..num_symbols {
                let moved = self.move_on_symbol(&explored.subsets[current], symbol);
                let next = self.epsilon_closure(&moved);
                if next.is_empty() {
                    row.push((symbol, None));
                    continue;
                }
                let next = match explored.index.get(&next) {
                    Some(&known) => known,
                    None => {
                        let id = explored.register(next);
                        trace!("discovered subset-state #{id}: {:?}", explored.subsets[id]);
                        worklist.push_back(id);
                        id
                    }
                };
                row.push((symbol, Some(next)));
            }
            explored.rows.push((current, row));

            if explored.subsets[current].intersects(nfa.accepting_state_set()) {
                explored.accepting.push(current);
            }
        }

        explored
    }
}

/// Convert with the default configuration.
pub fn convert(nfa: &Nfa) -> Dfa {
    Converter::new(nfa).convert()
}

/// Convert independent NFAs in parallel, preserving input order.
pub fn convert_all(nfas: &[Nfa], config: &Config) -> Vec<Dfa> {
    nfas.par_iter()
        .map(|nfa| Converter::new(nfa).configure(config.clone()).convert())
        .collect()
}

/// Result of the exploration loop, with subset-states referred to by their
/// discovery index. `None` destinations are the empty subset-state.
#[derive(Debug, Default)]
struct Explored {
    subsets: Vec<StateSet>,
    index: HashMap<StateSet, usize>,
    rows: Vec<(usize, Vec<(SymbolId, Option<usize>)>)>,
    accepting: Vec<usize>,
}

impl Explored {
    fn register(&mut self, subset: StateSet) -> usize {
        let id = self.subsets.len();
        self.index.insert(subset.clone(), id);
        self.subsets.push(subset);
        id
    }

    fn prune_by_traversal(self) -> Kept {
        let mut reachable = vec![false; self.subsets.len()];
        let row_of: HashMap<usize, usize> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, (state, _))| (*state, i))
            .collect();
        let mut queue = VecDeque::from([0]);
        reachable[0] = true;
        while let Some(state) = queue.pop_front() {
            let Some(&row) = row_of.get(&state) else {
                continue;
            };
            for &(_, next) in &self.rows[row].1 {
                if let Some(next) = next {
                    if !reachable[next] {
                        reachable[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        let dropped = reachable.iter().filter(|r| !**r).count();
        if dropped > 0 {
            debug!("pruned {dropped} unreachable subset-states");
        }

        let rows = self
            .rows
            .into_iter()
            .filter(|(state, _)| reachable[*state])
            .map(|(state, row)| {
                let row = row
                    .into_iter()
                    .filter(|(_, next)| next.map_or(true, |n| reachable[n]))
                    .collect();
                (state, row)
            })
            .collect();
        Kept {
            states: (0..self.subsets.len()).filter(|&s| reachable[s]).collect(),
            accepting: self
                .accepting
                .into_iter()
                .filter(|&s| reachable[s])
                .collect(),
            rows,
            subsets: self.subsets,
        }
    }

    fn prune_by_member_universe(self) -> Kept {
        let mut universe = StateSet::default();
        for subset in &self.subsets {
            universe.union_with(subset);
        }
        let subsets = self.subsets;
        let keep = |state: usize| subsets[state].intersects(&universe);

        let rows = self
            .rows
            .into_iter()
            .filter(|(state, _)| keep(*state))
            .map(|(state, row)| {
                let row = row
                    .into_iter()
                    .filter(|(_, next)| next.is_some_and(keep))
                    .collect();
                (state, row)
            })
            .collect();
        Kept {
            states: (0..subsets.len()).filter(|&s| keep(s)).collect(),
            accepting: self.accepting.into_iter().filter(|&s| keep(s)).collect(),
            rows,
            subsets,
        }
    }
}

struct Kept {
    subsets: Vec<StateSet>,
    states: Vec<usize>,
    accepting: Vec<usize>,
    rows: Vec<(usize, Vec<(SymbolId, Option<usize>)>)>,
}

impl Kept {
    fn into_dfa(self, nfa: &Nfa) -> Dfa {
        let named: Vec<SubsetState> = self
            .subsets
            .iter()
            .map(|subset| SubsetState::new(subset.iter().map(|id| nfa.state_name(id))))
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|(state, row)| TransitionRow {
                state: named[state].clone(),
                transitions: row
                    .into_iter()
                    .map(|(symbol, next)| {
                        let next = next.map_or_else(SubsetState::empty, |n| named[n].clone());
                        (nfa.symbol_name(symbol).to_owned(), next)
                    })
                    .collect(),
            })
            .collect();
        Dfa::new(
            nfa.get_alphabet().to_vec(),
            named[0].clone(),
            self.states.iter().map(|&s| named[s].clone()).collect(),
            self.accepting.iter().map(|&s| named[s].clone()).collect(),
            rows,
        )
    }
}
