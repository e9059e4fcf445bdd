//! Modal dialog lifecycle.
//!
//! ```text
//!            open()                 submit() -> callback runs once
//!  Closed ----------> Open ----------------------------------> Closed
//!    ^                 |  \
//!    |    cancel()     |   open() again: old callback dropped
//!    +-----------------+
//! ```
//!
//! The pending callback is an `FnOnce` that is moved out of the state on
//! submit, so it cannot fire twice; a second submit finds `Closed`.

use tracing::debug;

use crate::types::{FieldSpec, RawInput};

/// What the presentation layer needs to draw the dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalPrompt {
    pub title: String,
    pub fields: FieldSpec,
    pub notes: Vec<String>,
}

impl ModalPrompt {
    pub fn new(title: impl Into<String>, fields: FieldSpec, notes: Vec<String>) -> Self {
        Self {
            title: title.into(),
            fields,
            notes,
        }
    }
}

type SubmitCallback<C, R> = Box<dyn FnOnce(&RawInput, &mut C) -> R>;

enum ModalState<C, R> {
    Closed,
    Open {
        prompt: ModalPrompt,
        on_submit: SubmitCallback<C, R>,
    },
}

/// Holds at most one pending submit handler.
///
/// `C` is the context the callback mutates when it runs, `R` what it
/// returns to the caller of `submit`.
pub struct ModalController<C, R> {
    state: ModalState<C, R>,
}

impl<C, R> ModalController<C, R> {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }

    /// Open the dialog. Returns `true` when this replaced a dialog that was
    /// still open; that dialog's callback is dropped without running.
    pub fn open<F>(&mut self, prompt: ModalPrompt, on_submit: F) -> bool
    where
        F: FnOnce(&RawInput, &mut C) -> R + 'static,
    {
        let replaced = self.is_open();
        debug!(title = %prompt.title, replaced, "modal opened");
        self.state = ModalState::Open {
            prompt,
            on_submit: Box::new(on_submit),
        };
        replaced
    }

    /// Close the dialog and run its callback with `input`.
    /// Returns `None` when no dialog was open.
    pub fn submit(&mut self, input: &RawInput, ctx: &mut C) -> Option<R> {
        match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Open { prompt, on_submit } => {
                debug!(title = %prompt.title, "modal submitted");
                Some(on_submit(input, ctx))
            }
            ModalState::Closed => None,
        }
    }

    /// Close without running the callback. Returns `true` if a dialog was open.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Open { prompt, .. } => {
                debug!(title = %prompt.title, "modal cancelled");
                true
            }
            ModalState::Closed => false,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn prompt(&self) -> Option<&ModalPrompt> {
        match &self.state {
            ModalState::Open { prompt, .. } => Some(prompt),
            ModalState::Closed => None,
        }
    }
}

impl<C, R> Default for ModalController<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    const FIELDS: FieldSpec = &[Field::text("name", "Name")];

    fn prompt(title: &str) -> ModalPrompt {
        ModalPrompt::new(title, FIELDS, vec![])
    }

    /// Callback that counts its calls in the context and echoes the input.
    fn counting(tag: &'static str) -> impl FnOnce(&RawInput, &mut Vec<String>) -> String {
        move |input, calls| {
            let value = format!("{}:{}", tag, input.get("name").unwrap_or(""));
            calls.push(value.clone());
            value
        }
    }

    #[test]
    fn test_submit_runs_callback_once() {
        let mut modal = ModalController::new();
        let mut calls = Vec::new();
        modal.open(prompt("Greet"), counting("a"));
        assert!(modal.is_open());
        assert_eq!(modal.prompt().unwrap().title, "Greet");

        let input = RawInput::new().with("name", "ann");
        assert_eq!(modal.submit(&input, &mut calls), Some("a:ann".to_string()));
        assert!(!modal.is_open());
        assert_eq!(modal.submit(&input, &mut calls), None);
        assert_eq!(calls, vec!["a:ann"]);
    }

    #[test]
    fn test_cancel_discards_callback() {
        let mut modal = ModalController::new();
        let mut calls: Vec<String> = Vec::new();
        modal.open(prompt("Greet"), counting("a"));
        assert!(modal.cancel());
        assert!(!modal.cancel());
        assert_eq!(modal.submit(&RawInput::new(), &mut calls), None);
        assert!(calls.is_empty());
        assert!(modal.prompt().is_none());
    }

    #[test]
    fn test_reopen_replaces_pending_callback() {
        let mut modal = ModalController::new();
        let mut calls = Vec::new();
        assert!(!modal.open(prompt("First"), counting("first")));
        assert!(modal.open(prompt("Second"), counting("second")));
        assert_eq!(modal.prompt().unwrap().title, "Second");

        let input = RawInput::new().with("name", "bo");
        modal.submit(&input, &mut calls);
        assert_eq!(calls, vec!["second:bo"]);
    }
}
