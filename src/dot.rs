//! Graphviz DOT rendering of both automata.
//!
//! Only DOT text is produced here; turning it into an image is left to the
//! `dot` tool.

use std::fmt::Write;

use crate::dfa::Dfa;
use crate::nfa::Nfa;

const BACKGROUND: &str = "#22092C";
const ACCEPTING_FILL: &str = "#F05941";
const STATE_FILL: &str = "#872341";

/// Every state the NFA mentions gets a node, declared or not.
pub fn nfa_to_dot(nfa: &Nfa) -> String {
    let mut nodes: Vec<&str> = nfa.get_states().collect();
    let endpoints = nfa
        .transitions()
        .flat_map(|(src, _, destinations)| std::iter::once(src).chain(destinations.iter()))
        .map(|state| nfa.state_name(state));
    let mentioned = std::iter::once(nfa.get_initial_state())
        .chain(endpoints)
        .chain(nfa.get_accepting_states());
    for name in mentioned {
        if !nodes.contains(&name) {
            nodes.push(name);
        }
    }

    let mut out = header("nfa");
    for name in &nodes {
        let accepting = nfa
            .state_id(name)
            .is_some_and(|id| nfa.is_accepting_state(id));
        node(&mut out, name, accepting);
    }
    start_marker(&mut out, nfa.get_initial_state());
    for (src, symbol, destinations) in nfa.transitions() {
        for dst in destinations.iter() {
            edge(
                &mut out,
                nfa.state_name(src),
                nfa.state_name(dst),
                nfa.symbol_name(symbol),
            );
        }
    }
    out.push_str("}\n");
    out
}

/// "No transition" entries are not drawn.
pub fn dfa_to_dot(dfa: &Dfa) -> String {
    let mut out = header("dfa");
    for state in dfa.get_states() {
        node(&mut out, &state.to_string(), dfa.is_accepting_state(state));
    }
    start_marker(&mut out, &dfa.get_start_state().to_string());
    for (src, symbol, dst) in dfa.transition_entries() {
        if !dst.is_empty() {
            edge(&mut out, &src.to_string(), &dst.to_string(), symbol);
        }
    }
    out.push_str("}\n");
    out
}

fn header(name: &str) -> String {
    format!("digraph {name} {{\n    bgcolor=\"{BACKGROUND}\";\n")
}

fn node(out: &mut String, name: &str, accepting: bool) {
    let (shape, fill) = if accepting {
        ("doublecircle", ACCEPTING_FILL)
    } else {
        ("circle", STATE_FILL)
    };
    let _ = writeln!(
        out,
        "    {} [shape={shape}, style=filled, fillcolor=\"{fill}\", color=white, fontcolor=white];",
        quote(name)
    );
}

fn start_marker(out: &mut String, initial: &str) {
    let _ = writeln!(out, "    __start [shape=point, color=white];");
    let _ = writeln!(out, "    __start -> {} [color=white];", quote(initial));
}

fn edge(out: &mut String, from: &str, to: &str, label: &str) {
    let _ = writeln!(
        out,
        "    {} -> {} [label={}, color=white, fontcolor=white];",
        quote(from),
        quote(to),
        quote(label)
    );
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
