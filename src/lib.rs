//! zcalc: a keypad calculator with exact decimal arithmetic.

pub mod calculator;
pub mod config;
pub mod error;
pub mod logging;
pub mod ui;

pub use calculator::{CalcResult, Calculator, Operator};
pub use config::Config;
pub use error::{CalcError, ClipboardError, KeypadError};
pub use ui::{Action, CalculatorView, ViewChange};
