//! Line-oriented textual NFA descriptions.
//!
//! ```text
//! # comment
//! states q0 q1 q2
//! alphabet a b
//! transitions q0 a:q0,q1 ε:q1
//! transitions q1 b:q2
//! initial q0
//! accepting q2
//! ```
//!
//! `states`, `alphabet`, `initial` and `accepting` may each appear once;
//! `transitions` may repeat, once per source state. A `transitions` line may
//! list no entries at all.

use std::str::FromStr;

use crate::error::DescriptionError;
use crate::nfa::{Nfa, NfaBuilder};
use crate::{Error, Result};

impl FromStr for Nfa {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

pub fn parse(text: &str) -> Result<Nfa> {
    let mut builder = NfaBuilder::new();
    let mut seen: Vec<&str> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut words = line.split_whitespace();
        let Some(directive) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        let missing = || DescriptionError::MissingArgument {
            line: line_no,
            directive: directive.to_string(),
        };
        match directive {
            "states" | "alphabet" | "initial" | "accepting" => {
                if seen.contains(&directive) {
                    return Err(DescriptionError::DuplicateDirective {
                        line: line_no,
                        directive: directive.to_string(),
                    }
                    .into());
                }
                seen.push(directive);
            }
            "transitions" => {}
            _ => {
                return Err(DescriptionError::UnknownDirective {
                    line: line_no,
                    directive: directive.to_string(),
                }
                .into())
            }
        }

        builder = match directive {
            "states" => {
                if args.is_empty() {
                    return Err(missing().into());
                }
                builder.states(args)
            }
            "alphabet" => builder.alphabet(args),
            "initial" => match args.as_slice() {
                [] => return Err(missing().into()),
                [state] => builder.initial_state(*state),
                _ => return Err(DescriptionError::TooManyInitialStates { line: line_no }.into()),
            },
            "accepting" => builder.accepting_states(args),
            _ => {
                let (state, entries) = args.split_first().ok_or_else(missing)?;
                entries.iter().try_fold(builder, |builder, entry| {
                    let (symbol, destinations) = parse_entry(entry)?;
                    Ok::<_, Error>(builder.transition(*state, symbol, destinations))
                })?
            }
        };
    }

    builder.build()
}

/// `symbol:dest1,dest2`; an empty symbol is epsilon.
fn parse_entry(entry: &str) -> Result<(&str, Vec<&str>), DescriptionError> {
    let malformed = || DescriptionError::MalformedTransition(entry.to_string());
    let (symbol, destinations) = entry.split_once(':').ok_or_else(malformed)?;
    let destinations: Vec<&str> = destinations.split(',').collect();
    if destinations.iter().any(|d| d.is_empty()) {
        return Err(malformed());
    }
    Ok((symbol, destinations))
}
