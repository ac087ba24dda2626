use std::io::Read;
use std::process::ExitCode;

use log::error;
use subset_dfa::{convert, dot, Nfa};

/// Reads an NFA description on stdin and prints the DFA transition table.
/// With `--dot`, the DOT graphs of the NFA and the DFA follow the table.
fn main() -> ExitCode {
    env_logger::init();
    let with_dot = std::env::args().skip(1).any(|arg| arg == "--dot");

    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        error!("failed to read stdin: {e}");
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    let nfa: Nfa = match text.parse() {
        Ok(nfa) => nfa,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let dfa = convert(&nfa);
    print!("{dfa}");
    if with_dot {
        println!();
        print!("{}", dot::nfa_to_dot(&nfa));
        println!();
        print!("{}", dot::dfa_to_dot(&dfa));
    }
    ExitCode::SUCCESS
}
