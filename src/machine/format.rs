//! Line-oriented machine description format
//!
//! ```text
//! # accepts 0*1
//! start 0
//! accept 1
//! alphabet 0 1
//! 0 0 -> 0 0 R
//! 0 1 -> 1 1 R
//! ```
//!
//! `_` denotes the blank. Directions are `L`, `R`, `S` or `-1`, `+1`, `0`.

use super::{Move, State, Symbol, TuringMachine};
use crate::ReductionError;
use std::str::FromStr;

impl FromStr for TuringMachine {
    type Err = ReductionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = TuringMachine::builder();

        for (idx, raw) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            builder = match fields.as_slice() {
                ["start", q] => builder.initial_state(parse_state(q, line_no)?),
                ["accept", q] => builder.accept_state(parse_state(q, line_no)?),
                ["alphabet", symbols @ ..] => {
                    let symbols = symbols
                        .iter()
                        .map(|s| parse_symbol(s, line_no))
                        .collect::<Result<Vec<_>, _>>()?;
                    builder.alphabet(symbols)
                }
                [q, a, "->", r, b, d] => builder.add_transition(
                    parse_state(q, line_no)?,
                    parse_symbol(a, line_no)?,
                    parse_state(r, line_no)?,
                    parse_symbol(b, line_no)?,
                    parse_move(d, line)?,
                ),
                _ => {
                    return Err(ReductionError::Parse {
                        line: line_no,
                        message: format!("unrecognized line '{}'", line),
                    })
                }
            };
        }

        builder.build()
    }
}

fn parse_state(token: &str, line: usize) -> Result<State, ReductionError> {
    token
        .trim_start_matches('q')
        .parse()
        .map_err(|_| ReductionError::Parse {
            line,
            message: format!("invalid state '{}'", token),
        })
}

fn parse_symbol(token: &str, line: usize) -> Result<Symbol, ReductionError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some('_'), None) => Ok(Symbol::Blank),
        (Some(c), None) => Ok(Symbol::Char(c)),
        _ => Err(ReductionError::Parse {
            line,
            message: format!("symbol '{}' must be a single character", token),
        }),
    }
}

fn parse_move(token: &str, transition: &str) -> Result<Move, ReductionError> {
    match token {
        "L" | "l" => Ok(Move::Left),
        "R" | "r" => Ok(Move::Right),
        "S" | "s" => Ok(Move::Stay),
        _ => token
            .parse::<i8>()
            .ok()
            .and_then(Move::from_i8)
            .ok_or_else(|| ReductionError::InvalidDirection {
                transition: transition.to_string(),
            }),
    }
}
