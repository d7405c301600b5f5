//! Terminal rendering of the calculator display.
//!
//! Draws a fixed-width box with the formula on the top line and the main
//! value below it, both right-aligned like a hardware calculator.

use super::view::CalculatorView;

/// Default inner width of the display box, in characters.
pub const DEFAULT_WIDTH: usize = 32;

const ELLIPSIS: char = '…';
const ERROR_MARK: &str = "! ";

/// Options for [`render_display`].
#[derive(Clone, Copy, Debug)]
pub struct DisplayOptions {
    pub width: usize,
    pub show_formula: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            show_formula: true,
        }
    }
}

/// Render the view's display as a boxed block of text.
pub fn render_display(view: &CalculatorView, options: DisplayOptions) -> String {
    let width = options.width.max(4);
    let is_error = view.model().error().is_some();

    let main_text = if is_error {
        format!("{}{}", ERROR_MARK, view.main_view())
    } else if view.main_view().is_empty() {
        "0".to_string()
    } else {
        view.main_view().to_string()
    };

    let border = "─".repeat(width);
    let mut lines = vec![format!("┌{border}┐")];
    if options.show_formula {
        lines.push(format!("│{}│", fit_right(view.sub_view(), width)));
    }
    lines.push(format!("│{}│", fit_right(&main_text, width)));
    lines.push(format!("└{border}┘"));

    lines.join("\n")
}

/// Right-align `text` in `width` columns, keeping the tail when it overflows.
fn fit_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{}{}", " ".repeat(width - len), text);
    }

    // Keep the least significant end visible.
    let tail: String = text.chars().skip(len - (width - 1)).collect();
    format!("{ELLIPSIS}{tail}")
}
