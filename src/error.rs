//! Error types shared across the calculator and its front-end.

use thiserror::Error;

/// Failure of a single evaluation.
///
/// The `Display` text is what ends up on the main display, so keep it short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("cannot divide by zero")]
    DivideByZero,
    #[error("result too large")]
    Overflow,
}

/// Errors produced while turning typed keys into keypad actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeypadError {
    #[error("unknown key '{key}' at position {position}")]
    UnknownKey { key: char, position: usize },
}

/// Errors from the system clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Access(#[source] arboard::Error),
    #[error("Failed to copy to clipboard: {0}")]
    Copy(#[source] arboard::Error),
}
