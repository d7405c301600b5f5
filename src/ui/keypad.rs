//! Typed key sequences for the terminal keypad.
//!
//! Maps each character of an input line to a keypad [`Action`], so a line
//! like `12+3=` behaves like pressing those buttons in order.

use lazy_static::lazy_static;
use regex::Regex;

use super::view::Action;
use crate::calculator::Operator;
use crate::error::KeypadError;

lazy_static! {
    /// Matches lines made only of keypad characters.
    static ref KEYPAD_CHARS: Regex = Regex::new(
        r"^[0-9\s\.\+\-\*/×÷xX=±nNcCaAyY<]+$"
    ).unwrap();
}

/// Fast pre-check that a line contains nothing but keypad keys.
pub fn looks_like_keys(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && KEYPAD_CHARS.is_match(trimmed)
}

/// Map one key to its action. Whitespace maps to `None`.
pub fn action_for_key(key: char) -> Option<Action> {
    let action = match key {
        '0'..='9' | '.' => Action::Digit(key.to_string()),
        '+' => operator(Operator::Addition),
        '-' => operator(Operator::Subtraction),
        '*' | '×' | 'x' | 'X' => operator(Operator::Multiplication),
        '/' | '÷' => operator(Operator::Division),
        '=' => Action::Evaluate,
        'n' | 'N' | '±' => Action::InvertSign,
        '<' => Action::Delete,
        'c' | 'C' => Action::Clear,
        'a' | 'A' => Action::AllClear,
        'y' | 'Y' => Action::Copy,
        _ => return None,
    };
    Some(action)
}

fn operator(op: Operator) -> Action {
    Action::Operator(op.token().to_string())
}

/// Parse a whole line into actions.
pub fn parse_keys(input: &str) -> Result<Vec<Action>, KeypadError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, key)| {
            action_for_key(key).ok_or(KeypadError::UnknownKey { key, position })
        })
        .collect()
}
