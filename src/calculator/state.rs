//! Keypad calculator state machine.
//!
//! Holds a first operand, an optional operator and a second operand, plus the
//! two strings the view shows: the `result` (main display) and the `formula`
//! (the expression above it). There are no named states; the `evaluated` flag
//! only changes how the next digit is interpreted.

use tracing::{debug, info, warn};

use super::evaluation::{CalcResult, evaluate_expression};
use super::operand::Operand;
use super::operator::Operator;
use crate::error::CalcError;

/// Which operand slot receives input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

/// Calculator input and display state.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    first: Option<Operand>,
    second: Option<Operand>,
    operator: Option<Operator>,
    evaluated: bool,
    result: String,
    formula: String,
    /// Raw form of the last successful result, for the clipboard.
    last_value: Option<String>,
    /// Failure currently shown on the main display.
    error: Option<CalcError>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Main display text.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Expression shown above the main display.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn first(&self) -> Option<&Operand> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&Operand> {
        self.second.as_ref()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Ungrouped text of the last successful result, while the main display
    /// still shows it.
    pub fn clipboard_value(&self) -> Option<&str> {
        self.last_value.as_deref()
    }

    /// The evaluation failure shown on the main display, if any.
    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    /// Both operands present and an operator selected.
    pub fn can_evaluate(&self) -> bool {
        self.first.is_some() && self.second.is_some() && self.operator.is_some()
    }

    /// The slot that digits, sign toggles and deletes apply to.
    pub fn active_slot(&self) -> Slot {
        if self.operator.is_some() {
            Slot::Second
        } else {
            Slot::First
        }
    }

    fn active(&self) -> Option<&Operand> {
        match self.active_slot() {
            Slot::First => self.first.as_ref(),
            Slot::Second => self.second.as_ref(),
        }
    }

    /// Store `operand` in the active slot and mirror it on the main display.
    fn set_active(&mut self, operand: Option<Operand>) {
        self.last_value = None;
        // Editing after a failure goes back to the in-progress formula.
        if self.error.take().is_some()
            && let (Some(first), Some(operator)) = (&self.first, self.operator)
        {
            self.formula = format!("{} {}", first, operator.symbol());
        }
        self.result = operand
            .as_ref()
            .map(|o| o.as_str().to_string())
            .unwrap_or_default();
        match self.active_slot() {
            Slot::First => self.first = operand,
            Slot::Second => self.second = operand,
        }
    }

    /// Append a digit `"0"`..`"9"` or `"."` to the active operand.
    pub fn enter_digit_or_dot(&mut self, token: &str) {
        let is_dot = token == ".";
        let is_digit = token.len() == 1 && token.chars().all(|c| c.is_ascii_digit());
        if !is_dot && !is_digit {
            debug!(token, "ignoring non-digit token");
            return;
        }

        // A digit after "=" starts a new calculation.
        if self.evaluated {
            self.clear_all();
        }

        let next = match self.active() {
            Some(current) if current.is_full() => {
                debug!(operand = %current, "operand is full, dropping input");
                return;
            }
            Some(current) if is_dot && current.has_decimal_point() => return,
            Some(current) => current.appended(token),
            None => Operand::first_keystroke(token),
        };

        self.set_active(Some(next));
    }

    /// Select an operator from its keypad token `+ - * /`.
    pub fn set_operator(&mut self, token: &str) {
        let Ok(requested) = token.parse::<Operator>() else {
            debug!(token, "ignoring unknown operator token");
            return;
        };

        self.evaluated = false;

        // One operator per expression.
        if self.second.is_some() {
            return;
        }

        if self.first.is_none() {
            if requested == Operator::Subtraction {
                // Leading minus starts a negative first operand.
                self.set_active(Some(Operand::negative_marker()));
            }
            return;
        }

        if requested == Operator::Subtraction
            && self.operator.is_some_and(Operator::binds_negative_operand)
        {
            self.set_active(Some(Operand::negative_marker()));
            return;
        }

        let first = match self.first.take() {
            Some(first) if first.is_negative_marker() => Operand::zero(),
            Some(first) => first,
            None => return,
        };

        self.formula = format!("{} {}", first, requested.symbol());
        self.first = Some(first);
        self.operator = Some(requested);
        self.result.clear();
        self.last_value = None;
        self.error = None;
        debug!(formula = %self.formula, "operator set");
    }

    /// Toggle the sign of the active operand.
    pub fn invert_sign(&mut self) {
        let Some(current) = self.active() else {
            return;
        };
        let next = current.negated();
        self.set_active(next);
    }

    /// Backspace on the active operand.
    pub fn delete_last_char(&mut self) {
        let next = self.active().and_then(Operand::without_last);
        self.set_active(next);
    }

    /// Clear only the operand being entered.
    pub fn clear_active(&mut self) {
        self.set_active(None);
    }

    /// Reset to the initial state.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Compute `first operator second`.
    ///
    /// On success the result seeds the first operand for chaining. On
    /// failure the operands and operator are kept so the input can be
    /// corrected and evaluated again.
    pub fn evaluate(&mut self) -> Option<CalcResult> {
        let (Some(first), Some(operator), Some(second)) =
            (self.first.as_ref(), self.operator, self.second.as_ref())
        else {
            return None;
        };

        let outcome = evaluate_expression(first, operator, second);
        self.formula = format!("{} =", outcome.expression());
        self.result = outcome.display();

        match &outcome {
            CalcResult::Success {
                value,
                clipboard_result,
                ..
            } => {
                info!(formula = %self.formula, result = %self.result, "evaluated");
                self.first = Some(Operand::from_value(*value));
                self.second = None;
                self.operator = None;
                self.last_value = Some(clipboard_result.clone());
                self.error = None;
                self.evaluated = true;
            }
            CalcResult::Error { error, .. } => {
                warn!(formula = %self.formula, %error, "evaluation failed");
                self.last_value = None;
                self.error = Some(*error);
            }
        }

        Some(outcome)
    }
}
