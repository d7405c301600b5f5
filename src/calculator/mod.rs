//! Calculator module for keypad arithmetic.
//!
//! This module provides functionality to:
//! - Accumulate operands and an operator from keypad input
//! - Evaluate the expression with exact decimal arithmetic
//! - Copy results to the clipboard

mod clipboard;
mod evaluation;
mod operand;
mod operator;
mod state;

pub use clipboard::copy_to_clipboard;
pub use evaluation::{CalcResult, DISPLAY_DECIMALS, evaluate_expression, format_display};
pub use operand::{MAX_SIGNIFICANT_CHARS, Operand};
pub use operator::{Operator, UnknownOperator};
pub use state::{Calculator, Slot};
