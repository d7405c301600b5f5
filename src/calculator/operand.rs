//! Operand text as typed on the keypad.
//!
//! Operands stay as text while they are being entered so the display shows
//! exactly what was typed ("0.", "-", "1.50"). They are only parsed into a
//! [`Decimal`] when the expression is evaluated.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Maximum number of characters in an operand, not counting the decimal point.
pub const MAX_SIGNIFICANT_CHARS: usize = 16;

const NEGATIVE_MARKER: &str = "-";

/// Non-empty operand text. An empty slot is represented as `None` by the
/// owner, never as an empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operand(String);

impl Operand {
    /// The lone "-" typed before any digit of a negative number.
    pub fn negative_marker() -> Self {
        Self(NEGATIVE_MARKER.to_string())
    }

    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// Operand started by a single keystroke; a bare point reads "0.".
    pub fn first_keystroke(token: &str) -> Self {
        if token == "." {
            Self("0.".to_string())
        } else {
            Self(token.to_string())
        }
    }

    /// Text form of a computed value, used to chain into the next expression.
    pub fn from_value(value: Decimal) -> Self {
        Self(value.to_string())
    }

    /// Builds an operand from text, returning `None` for an empty string.
    pub fn from_text(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() { None } else { Some(Self(text)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_negative_marker(&self) -> bool {
        self.0 == NEGATIVE_MARKER
    }

    pub fn has_decimal_point(&self) -> bool {
        self.0.contains('.')
    }

    /// Characters counted against [`MAX_SIGNIFICANT_CHARS`].
    pub fn significant_len(&self) -> usize {
        self.0.chars().filter(|&c| c != '.').count()
    }

    pub fn is_full(&self) -> bool {
        self.significant_len() >= MAX_SIGNIFICANT_CHARS
    }

    /// Returns this operand with `suffix` appended.
    pub fn appended(&self, suffix: &str) -> Self {
        let mut text = self.0.clone();
        text.push_str(suffix);
        Self(text)
    }

    /// Toggles the leading minus sign. Stripping the sign from the lone
    /// marker leaves nothing, hence the `Option`.
    pub fn negated(&self) -> Option<Self> {
        match self.0.strip_prefix('-') {
            Some(rest) => Self::from_text(rest),
            None => Some(Self(format!("-{}", self.0))),
        }
    }

    /// Removes the last character.
    pub fn without_last(&self) -> Option<Self> {
        let mut text = self.0.clone();
        text.pop();
        Self::from_text(text)
    }

    /// Exact numeric value. A trailing point is ignored and a sign with no
    /// digits reads as zero.
    ///
    /// Keypad entry only produces an optional sign, at most 16 ASCII digits
    /// and one point, and chained operands come from `Decimal::to_string`,
    /// so the parse cannot fail for operands built by [`Calculator`].
    ///
    /// [`Calculator`]: super::Calculator
    pub fn value(&self) -> Decimal {
        let digits = self.0.strip_suffix('.').unwrap_or(&self.0);
        if digits.is_empty() || digits == NEGATIVE_MARKER {
            return Decimal::ZERO;
        }
        match Decimal::from_str(digits) {
            Ok(value) => value,
            Err(e) => {
                debug_assert!(false, "unparseable operand {digits:?}: {e}");
                Decimal::ZERO
            }
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
