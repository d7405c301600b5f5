pub mod display;
pub mod keypad;
pub mod view;

pub use display::{DisplayOptions, render_display};
pub use keypad::{looks_like_keys, parse_keys};
pub use view::{Action, CalculatorView, ViewChange};
