//! Exact decimal evaluation of a single binary expression.
//!
//! Applies one [`Operator`] to two operands with overflow detection and
//! formats the outcome for the display and for the clipboard.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::operand::Operand;
use super::operator::Operator;
use crate::error::CalcError;

/// Fractional digits kept in a displayed result.
pub const DISPLAY_DECIMALS: u32 = 9;

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug)]
pub enum CalcResult {
    /// Successful calculation with a valid numeric result.
    Success {
        /// The expression as shown in the formula line, without "=".
        expression: String,
        /// The unrounded value, carried into the next expression.
        value: Decimal,
        /// Formatted for display (with thousand separators).
        display_result: String,
        /// Formatted for clipboard (raw number).
        clipboard_result: String,
    },
    /// Division by zero or overflow.
    Error {
        /// The expression as shown in the formula line, without "=".
        expression: String,
        error: CalcError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> String {
        match self {
            Self::Success { display_result, .. } => display_result.clone(),
            Self::Error { error, .. } => error.to_string(),
        }
    }

    /// Get the clipboard string (only for successful results).
    pub fn clipboard(&self) -> Option<&str> {
        match self {
            Self::Success {
                clipboard_result, ..
            } => Some(clipboard_result),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate `first operator second`.
pub fn evaluate_expression(first: &Operand, operator: Operator, second: &Operand) -> CalcResult {
    let expression = format!("{} {} {}", first, operator.symbol(), second);

    match apply(operator, first.value(), second.value()) {
        Ok(value) => CalcResult::Success {
            expression,
            display_result: format_display(value),
            clipboard_result: format_clipboard(value),
            value,
        },
        Err(error) => {
            debug!(%expression, %error, "evaluation failed");
            CalcResult::Error { expression, error }
        }
    }
}

/// Apply an operator with overflow detection.
pub fn apply(operator: Operator, lhs: Decimal, rhs: Decimal) -> Result<Decimal, CalcError> {
    let value = match operator {
        Operator::Addition => lhs.checked_add(rhs),
        Operator::Subtraction => lhs.checked_sub(rhs),
        Operator::Multiplication => lhs.checked_mul(rhs),
        Operator::Division => {
            if rhs.is_zero() {
                return Err(CalcError::DivideByZero);
            }
            lhs.checked_div(rhs)
        }
    };

    value.ok_or(CalcError::Overflow)
}

/// Round to the displayed precision, half away from zero, without trailing zeros.
fn round_for_display(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Format a number for display with thousand separators.
pub fn format_display(value: Decimal) -> String {
    let raw = format_clipboard(value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    match unsigned.split_once('.') {
        Some((int_part, dec_part)) => {
            format!("{}{}.{}", sign, group_thousands(int_part), dec_part)
        }
        None => format!("{}{}", sign, group_thousands(unsigned)),
    }
}

/// Format a number for clipboard (rounded, no separators).
pub fn format_clipboard(value: Decimal) -> String {
    let rounded = round_for_display(value);
    if rounded.is_zero() {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operand(text: &str) -> Operand {
        Operand::from_text(text).unwrap()
    }

    fn eval(a: &str, op: Operator, b: &str) -> CalcResult {
        evaluate_expression(&operand(a), op, &operand(b))
    }

    #[test]
    fn test_basic_evaluation() {
        let result = eval("2", Operator::Addition, "3");
        assert!(result.is_success());
        assert_eq!(result.display(), "5");
        assert_eq!(result.clipboard(), Some("5"));
        assert_eq!(result.expression(), "2 + 3");
    }

    #[test]
    fn test_thousand_separators() {
        let result = eval("1000", Operator::Multiplication, "1000");
        assert_eq!(result.display(), "1,000,000");
        assert_eq!(result.clipboard(), Some("1000000"));
        assert_eq!(result.expression(), "1000 × 1000");
    }

    #[test]
    fn test_negative_grouping() {
        let result = eval("-1234567", Operator::Subtraction, "0.5");
        assert_eq!(result.display(), "-1,234,567.5");
        assert_eq!(result.clipboard(), Some("-1234567.5"));
    }

    #[test]
    fn test_rounding_and_trimming() {
        assert_eq!(eval("1", Operator::Division, "3").display(), "0.333333333");
        assert_eq!(eval("2", Operator::Division, "3").display(), "0.666666667");
        assert_eq!(eval("1", Operator::Division, "4").display(), "0.25");
        assert_eq!(eval("1.50", Operator::Addition, "1.50").display(), "3");
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(
            format_display(Decimal::new(-10_000_000_005, 10)),
            "-1.000000001"
        );
        assert_eq!(format_display(Decimal::new(5, 10)), "0.000000001");
        assert_eq!(format_display(Decimal::new(-4, 10)), "0");
    }

    #[test]
    fn test_division_by_zero() {
        let result = eval("5", Operator::Division, "0");
        assert!(!result.is_success());
        assert_eq!(result.display(), "cannot divide by zero");
        assert_eq!(result.clipboard(), None);

        let result = eval("5", Operator::Division, "0.");
        assert_eq!(result.display(), "cannot divide by zero");
    }

    #[test]
    fn test_overflow() {
        let result = eval(
            "9999999999999999",
            Operator::Multiplication,
            "9999999999999999",
        );
        assert_eq!(result.display(), "result too large");

        assert_eq!(
            apply(Operator::Addition, Decimal::MAX, Decimal::ONE),
            Err(CalcError::Overflow)
        );
        assert_eq!(
            apply(Operator::Subtraction, Decimal::MIN, Decimal::ONE),
            Err(CalcError::Overflow)
        );
        assert_eq!(
            apply(Operator::Division, Decimal::MAX, Decimal::new(1, 1)),
            Err(CalcError::Overflow)
        );
    }

    #[test]
    fn test_unrounded_value_is_kept() {
        match eval("1", Operator::Division, "3") {
            CalcResult::Success { value, .. } => {
                assert!(value.scale() > DISPLAY_DECIMALS);
            }
            CalcResult::Error { .. } => panic!("expected success"),
        }
    }
}
