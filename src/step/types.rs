//! Macro step data model.
//!
//! A macro is an ordered sequence of `MacroStep`s; `Repeat` steps nest a
//! full sub-sequence, so the model is a tree. Serialization to the storage
//! format lives in `wire.rs`.

use serde::{Deserialize, Serialize};

/// One scheduled action in a macro.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroStep {
    pub action: StepAction,
    /// Wait before the step fires, in milliseconds.
    pub delay_ms: u64,
    /// Free-text annotation attached to the step. Distinct from the
    /// standalone `Comment` action, which never carries one.
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    /// A named digital input.
    ButtonPress { button: String },
    /// Analog stick input. Magnitude is not range-clamped here; that is the
    /// caller's concern.
    StickMove {
        stick: String,
        direction: String,
        magnitude: f64,
    },
    /// Repeated-press directive.
    AutoClicker {
        button: String,
        interval_ms: u64,
        duration_ms: u64,
    },
    /// Bounded loop over a nested step sequence.
    Repeat { count: u32, body: Vec<MacroStep> },
    /// Annotation with no runtime effect.
    Comment { text: String },
}

impl MacroStep {
    pub fn new(action: StepAction, delay_ms: u64) -> Self {
        MacroStep {
            action,
            delay_ms,
            comment: None,
        }
    }

    /// Standalone comment step. Always fires immediately and never carries
    /// an attached comment of its own.
    pub fn comment(text: impl Into<String>) -> Self {
        MacroStep {
            action: StepAction::Comment { text: text.into() },
            delay_ms: 0,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A named stored macro as the storage API persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<MacroStep>,
    /// Name of another stored macro to run after each loop of this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_of_loop_macro_name: Option<String>,
}
