//! View adapter between keypad actions and the calculator.
//!
//! Every action is forwarded to the [`Calculator`], after which the main and
//! sub display values are republished. Observers hear about a property only
//! when its value actually changed.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::calculator::{Calculator, copy_to_clipboard};
use crate::error::ClipboardError;

/// A keypad button press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Digit "0"-"9" or ".".
    Digit(String),
    /// Operator token "+", "-", "*" or "/".
    Operator(String),
    Evaluate,
    InvertSign,
    Delete,
    Clear,
    AllClear,
    /// Copy the last result to the clipboard.
    Copy,
}

/// A display value that changed after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewChange {
    MainView(String),
    SubView(String),
    CanEvaluate(bool),
}

type Copier = Arc<dyn Fn(&str) -> Result<(), ClipboardError> + Send + Sync>;

/// Display state bound to one calculator instance.
pub struct CalculatorView {
    model: Calculator,
    main_view: String,
    sub_view: String,
    can_evaluate: bool,
    copy_on_evaluate: bool,
    copier: Copier,
    on_change: Option<Arc<dyn Fn(&ViewChange) + Send + Sync>>,
}

impl Default for CalculatorView {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorView {
    pub fn new() -> Self {
        Self {
            model: Calculator::new(),
            main_view: String::new(),
            sub_view: String::new(),
            can_evaluate: false,
            copy_on_evaluate: false,
            copier: Arc::new(copy_to_clipboard),
            on_change: None,
        }
    }

    /// Copy every successful result to the clipboard as soon as it is computed.
    pub fn with_copy_on_evaluate(mut self, enabled: bool) -> Self {
        self.copy_on_evaluate = enabled;
        self
    }

    /// Replace the clipboard writer.
    pub fn with_copier(
        mut self,
        copier: impl Fn(&str) -> Result<(), ClipboardError> + Send + Sync + 'static,
    ) -> Self {
        self.copier = Arc::new(copier);
        self
    }

    /// Set the callback fired for each changed display value.
    pub fn set_on_change(&mut self, callback: impl Fn(&ViewChange) + Send + Sync + 'static) {
        self.on_change = Some(Arc::new(callback));
    }

    /// Primary display, mirrors the calculator result.
    pub fn main_view(&self) -> &str {
        &self.main_view
    }

    /// Secondary display, mirrors the formula.
    pub fn sub_view(&self) -> &str {
        &self.sub_view
    }

    /// Whether the "=" button is enabled.
    pub fn can_evaluate(&self) -> bool {
        self.can_evaluate
    }

    pub fn model(&self) -> &Calculator {
        &self.model
    }

    /// Run one action and republish the display.
    ///
    /// Only [`Action::Copy`] can fail; calculator errors are shown on the
    /// main display instead.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ClipboardError> {
        debug!(?action, "dispatch");
        match action {
            Action::Digit(token) => self.model.enter_digit_or_dot(&token),
            Action::Operator(token) => self.model.set_operator(&token),
            Action::Evaluate => self.evaluate(),
            Action::InvertSign => self.model.invert_sign(),
            Action::Delete => self.model.delete_last_char(),
            Action::Clear => self.model.clear_active(),
            Action::AllClear => self.model.clear_all(),
            Action::Copy => {
                self.copy_result()?;
            }
        }

        self.update_views();
        Ok(())
    }

    /// Run a sequence of actions. A failed copy is logged and returned but
    /// does not stop the actions after it.
    pub fn dispatch_all(
        &mut self,
        actions: impl IntoIterator<Item = Action>,
    ) -> Vec<ClipboardError> {
        let mut errors = Vec::new();
        for action in actions {
            if let Err(e) = self.dispatch(action) {
                warn!("{e}");
                errors.push(e);
            }
        }
        errors
    }

    /// Copy the last result. Returns `false` when there is nothing to copy.
    pub fn copy_result(&self) -> Result<bool, ClipboardError> {
        match self.model.clipboard_value() {
            Some(value) => {
                (self.copier)(value)?;
                debug!(value, "copied result");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn evaluate(&mut self) {
        if !self.can_evaluate {
            debug!("evaluate is disabled");
            return;
        }

        let succeeded = self.model.evaluate().is_some_and(|r| r.is_success());
        if succeeded
            && self.copy_on_evaluate
            && let Err(e) = self.copy_result()
        {
            warn!("{e}");
        }
    }

    fn update_views(&mut self) {
        if self.main_view != self.model.result() {
            self.main_view = self.model.result().to_string();
            self.notify(ViewChange::MainView(self.main_view.clone()));
        }

        let can_evaluate = self.model.can_evaluate();
        if can_evaluate != self.can_evaluate {
            self.can_evaluate = can_evaluate;
            self.notify(ViewChange::CanEvaluate(can_evaluate));
        }

        if self.sub_view != self.model.formula() {
            self.sub_view = self.model.formula().to_string();
            self.notify(ViewChange::SubView(self.sub_view.clone()));
        }
    }

    fn notify(&self, change: ViewChange) {
        if let Some(callback) = &self.on_change {
            callback(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn press(view: &mut CalculatorView, keys: &[Action]) {
        for action in keys {
            view.dispatch(action.clone()).unwrap();
        }
    }

    fn digit(d: &str) -> Action {
        Action::Digit(d.to_string())
    }

    fn op(o: &str) -> Action {
        Action::Operator(o.to_string())
    }

    fn recording_view() -> (CalculatorView, Arc<Mutex<Vec<ViewChange>>>) {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        let mut view = CalculatorView::new();
        view.set_on_change(move |change| sink.lock().unwrap().push(change.clone()));
        (view, changes)
    }

    #[test]
    fn test_views_mirror_calculator() {
        let mut view = CalculatorView::new();
        press(&mut view, &[digit("2"), op("+"), digit("3")]);
        assert_eq!(view.main_view(), "3");
        assert_eq!(view.sub_view(), "2 +");
        assert!(view.can_evaluate());

        press(&mut view, &[Action::Evaluate]);
        assert_eq!(view.main_view(), "5");
        assert_eq!(view.sub_view(), "2 + 3 =");
        assert!(!view.can_evaluate());
    }

    #[test]
    fn test_change_notifications() {
        let (mut view, changes) = recording_view();
        press(&mut view, &[digit("4"), op("*")]);

        let seen = changes.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                ViewChange::MainView("4".to_string()),
                ViewChange::MainView(String::new()),
                ViewChange::SubView("4 ×".to_string()),
            ]
        );
    }

    #[test]
    fn test_unchanged_values_not_notified() {
        let (mut view, changes) = recording_view();
        press(&mut view, &[Action::Delete, Action::Clear, Action::InvertSign]);
        assert!(changes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_can_evaluate_notified() {
        let (mut view, changes) = recording_view();
        press(&mut view, &[digit("1"), op("-"), digit("1")]);
        assert!(
            changes
                .lock()
                .unwrap()
                .contains(&ViewChange::CanEvaluate(true))
        );
    }

    #[test]
    fn test_can_evaluate_cleared_when_result_text_repeats() {
        let (mut view, changes) = recording_view();
        press(&mut view, &[digit("1"), op("*"), digit("1"), Action::Evaluate]);
        assert_eq!(view.main_view(), "1");
        assert!(!view.can_evaluate());
        assert_eq!(view.can_evaluate(), view.model().can_evaluate());
        assert_eq!(
            changes.lock().unwrap().last(),
            Some(&ViewChange::SubView("1 × 1 =".to_string()))
        );
        assert!(
            changes
                .lock()
                .unwrap()
                .contains(&ViewChange::CanEvaluate(false))
        );
    }

    #[test]
    fn test_disabled_evaluate_is_ignored() {
        let (mut view, changes) = recording_view();
        press(&mut view, &[digit("1"), op("+"), Action::Evaluate]);
        assert_eq!(view.sub_view(), "1 +");
        assert!(!view.model().is_evaluated());
        assert!(
            !changes
                .lock()
                .unwrap()
                .iter()
                .any(|c| matches!(c, ViewChange::CanEvaluate(_)))
        );
    }

    #[test]
    fn test_error_shown_on_main_view() {
        let mut view = CalculatorView::new();
        press(&mut view, &[digit("5"), op("/"), digit("0"), Action::Evaluate]);
        assert_eq!(view.main_view(), "cannot divide by zero");
        assert_eq!(view.sub_view(), "5 ÷ 0 =");
        assert!(view.can_evaluate());
    }

    #[test]
    fn test_copy_uses_raw_value() {
        let copied = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&copied);
        let mut view = CalculatorView::new().with_copier(move |text| {
            sink.lock().unwrap().push(text.to_string());
            Ok(())
        });

        press(&mut view, &[Action::Copy]);
        assert!(copied.lock().unwrap().is_empty());

        press(
            &mut view,
            &[digit("1"), digit("0"), digit("0"), digit("0"), op("*")],
        );
        press(
            &mut view,
            &[digit("1"), digit("0"), digit("0"), digit("0"), Action::Evaluate],
        );
        assert_eq!(view.main_view(), "1,000,000");
        press(&mut view, &[Action::Copy]);
        assert_eq!(*copied.lock().unwrap(), vec!["1000000".to_string()]);
    }

    #[test]
    fn test_failed_copy_keeps_dispatching() {
        let mut view = CalculatorView::new()
            .with_copier(|_| Err(ClipboardError::Copy(arboard::Error::ContentNotAvailable)));

        press(&mut view, &[digit("2"), op("+"), digit("2"), Action::Evaluate]);
        let errors = view.dispatch_all([
            Action::Copy,
            op("*"),
            digit("3"),
            Action::Evaluate,
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(view.main_view(), "12");
        assert_eq!(view.sub_view(), "4 × 3 =");
    }

    #[test]
    fn test_copy_on_evaluate() {
        let copied = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&copied);
        let mut view = CalculatorView::new()
            .with_copy_on_evaluate(true)
            .with_copier(move |text| {
                sink.lock().unwrap().push(text.to_string());
                Ok(())
            });

        press(&mut view, &[digit("1"), op("/"), digit("4"), Action::Evaluate]);
        press(&mut view, &[digit("1"), op("/"), digit("0"), Action::Evaluate]);
        assert_eq!(*copied.lock().unwrap(), vec!["0.25".to_string()]);
    }
}
