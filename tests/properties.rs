use std::collections::VecDeque;

use quickcheck::{quickcheck, Arbitrary, Gen};
use subset_dfa::{
    convert, Config, Converter, Dfa, Exploration, Nfa, Reachability, StateSet, SubsetState,
};

const SYMBOLS: [&str; 2] = ["a", "b"];

/// An NFA with up to five states over {a, b}, with random epsilon edges.
#[derive(Clone, Debug)]
struct SmallNfa(Nfa);

impl Arbitrary for SmallNfa {
    fn arbitrary(g: &mut Gen) -> Self {
        let n = usize::arbitrary(g) % 5 + 1;
        let names: Vec<String> = (0..n).map(|i| format!("q{i}")).collect();
        let mut builder = Nfa::builder()
            .states(names.clone())
            .alphabet(SYMBOLS)
            .initial_state(names[0].clone());
        for name in &names {
            for symbol in ["a", "b", "ε"] {
                let targets: Vec<String> = names
                    .iter()
                    .filter(|_| u8::arbitrary(g) % 3 == 0)
                    .cloned()
                    .collect();
                if !targets.is_empty() {
                    builder = builder.transition(name.clone(), symbol, targets);
                }
            }
        }
        let accepting: Vec<String> = names
            .iter()
            .filter(|_| bool::arbitrary(g))
            .cloned()
            .collect();
        SmallNfa(builder.accepting_states(accepting).build().unwrap())
    }
}

fn word(bits: &[bool]) -> Vec<&'static str> {
    bits.iter().map(|&b| SYMBOLS[b as usize]).collect()
}

fn subset_of(nfa: &Nfa, picks: &[u8]) -> StateSet {
    let n = nfa.num_states() as u32;
    picks.iter().map(|&p| p as u32 % n).collect()
}

fn nfa_members(nfa: &Nfa, state: &SubsetState) -> StateSet {
    nfa.state_set(state.members())
}

fn reachable(dfa: &Dfa) -> Vec<SubsetState> {
    let mut seen = vec![dfa.get_start_state().clone()];
    let mut queue = VecDeque::from([dfa.get_start_state().clone()]);
    while let Some(state) = queue.pop_front() {
        for symbol in dfa.get_alphabet() {
            if let Some(next) = dfa.next_state(&state, symbol) {
                if !seen.contains(next) {
                    seen.push(next.clone());
                    queue.push_back(next.clone());
                }
            }
        }
    }
    seen
}

quickcheck! {
    fn closure_is_idempotent(nfa: SmallNfa, picks: Vec<u8>) -> bool {
        let nfa = nfa.0;
        let once = nfa.epsilon_closure(&subset_of(&nfa, &picks));
        nfa.epsilon_closure(&once) == once
    }

    fn closure_contains_its_input(nfa: SmallNfa, picks: Vec<u8>) -> bool {
        let nfa = nfa.0;
        let set = subset_of(&nfa, &picks);
        set.is_subset(&nfa.epsilon_closure(&set))
    }

    fn every_state_has_one_entry_per_symbol(nfa: SmallNfa) -> bool {
        let dfa = convert(&nfa.0);
        dfa.get_transitions().iter().all(|row| {
            let symbols: Vec<&str> = row.transitions.iter().map(|(s, _)| s.as_str()).collect();
            symbols == SYMBOLS
        }) && dfa.get_transitions().len() == dfa.get_states().len()
    }

    fn dfa_accepts_the_same_language(nfa: SmallNfa, words: Vec<Vec<bool>>) -> bool {
        let nfa = nfa.0;
        let dfa = convert(&nfa);
        words.iter().all(|bits| {
            let input = word(bits);
            nfa.accepts(&input) == dfa.accepts(&input)
        })
    }

    fn every_configuration_accepts_the_same_language(nfa: SmallNfa, words: Vec<Vec<bool>>) -> bool {
        let nfa = nfa.0;
        let configs = [
            Config::new().exploration(Exploration::BreadthFirst),
            Config::new().reachability(Reachability::MemberUniverse),
            Config::new()
                .exploration(Exploration::BreadthFirst)
                .reachability(Reachability::MemberUniverse),
        ];
        configs.into_iter().all(|config| {
            let dfa = Converter::new(&nfa).configure(config).convert();
            words.iter().all(|bits| {
                let input = word(bits);
                nfa.accepts(&input) == dfa.accepts(&input)
            })
        })
    }

    fn state_count_is_bounded(nfa: SmallNfa) -> bool {
        let nfa = nfa.0;
        convert(&nfa).get_states().len() <= 1 << nfa.num_states()
    }

    fn accepting_iff_an_nfa_member_accepts(nfa: SmallNfa) -> bool {
        let nfa = nfa.0;
        let dfa = convert(&nfa);
        dfa.get_states().iter().all(|state| {
            let accepting = nfa_members(&nfa, state).intersects(nfa.accepting_state_set());
            dfa.is_accepting_state(state) == accepting
        })
    }

    fn every_state_is_reachable(nfa: SmallNfa) -> bool {
        let dfa = convert(&nfa.0);
        let seen = reachable(&dfa);
        seen.len() == dfa.get_states().len()
            && dfa.get_states().iter().all(|s| seen.contains(s))
    }

    fn start_state_is_the_initial_closure(nfa: SmallNfa) -> bool {
        let nfa = nfa.0;
        let dfa = convert(&nfa);
        let closure = nfa.epsilon_closure(&nfa.state_set([nfa.get_initial_state()]));
        nfa_members(&nfa, dfa.get_start_state()) == closure
            && dfa.get_states()[0] == *dfa.get_start_state()
    }
}
