//! Step model and the canonical storage wire format.

pub mod types;
pub mod wire;

pub use types::{MacroRecord, MacroStep, StepAction};
