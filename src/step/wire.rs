//! Canonical storage serialization for step sequences.
//!
//! On the wire a step is a 2- or 3-element array `[payload, delayMs, comment?]`
//! where the payload discriminates the step shape:
//!
//! - bare string (not `"COMMENT"`) — button press
//! - `[stick, direction, magnitude]` — stick move
//! - `{"type": "autoclicker", "button", "interval", "duration"}` — autoclicker
//! - `["REPEAT", count, nestedSteps]` — bounded loop
//! - the literal `"COMMENT"`, with the text in the third slot — comment
//!
//! Deserialization is strict about payload shapes: a payload matching none of
//! the above fails the whole parse (W002) so a stored macro is never silently
//! truncated. The delay slot is lenient and defaults to 0. REPEAT bodies may
//! nest up to the same depth bound both codec directions enforce (W004 past
//! it).

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::types::{MacroRecord, MacroStep, StepAction};
use crate::codec::MAX_NESTING_DEPTH;
use crate::error::CodecError;

const COMMENT_TAG: &str = "COMMENT";
const REPEAT_TAG: &str = "REPEAT";

/// Parse a stored macro record.
pub fn parse_record(json: &str) -> Result<MacroRecord, CodecError> {
    serde_json::from_str::<MacroRecord>(json)
        .map_err(|e| CodecError::wire("W001", format!("Failed to parse macro record: {}", e)))
}

/// Parse a bare step array.
pub fn parse_steps(json: &str) -> Result<Vec<MacroStep>, CodecError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CodecError::wire("W001", format!("Failed to parse steps JSON: {}", e)))?;
    steps_from_value(&value)
}

pub fn steps_from_value(value: &Value) -> Result<Vec<MacroStep>, CodecError> {
    steps_at_depth(value, 0)
}

fn steps_at_depth(value: &Value, depth: usize) -> Result<Vec<MacroStep>, CodecError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CodecError::wire(
            "W004",
            format!("REPEAT nesting exceeds {} levels", MAX_NESTING_DEPTH),
        ));
    }
    let items = value
        .as_array()
        .ok_or_else(|| CodecError::wire("W001", "Steps must be a JSON array"))?;
    items.iter().map(|item| step_from_value(item, depth)).collect()
}

fn step_from_value(value: &Value, depth: usize) -> Result<MacroStep, CodecError> {
    let slots = value.as_array().ok_or_else(|| {
        CodecError::wire("W002", format!("Step must be an array, got: {}", value))
    })?;
    let payload = slots
        .first()
        .ok_or_else(|| CodecError::wire("W002", "Step array is empty"))?;

    // Comment steps keep their text in the third slot and never fire with a
    // delay, whatever the delay slot happens to contain.
    if payload.as_str() == Some(COMMENT_TAG) {
        let text = slots
            .get(2)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Ok(MacroStep::comment(text));
    }

    let action = match payload {
        Value::String(button) => StepAction::ButtonPress {
            button: button.clone(),
        },
        Value::Array(parts) if parts.first().and_then(Value::as_str) == Some(REPEAT_TAG) => {
            let count = parts
                .get(1)
                .and_then(Value::as_u64)
                .and_then(|c| u32::try_from(c).ok())
                .ok_or_else(|| {
                    CodecError::wire("W002", "REPEAT count must be a non-negative integer")
                })?;
            let body = parts.get(2).ok_or_else(|| {
                CodecError::wire("W002", "REPEAT payload is missing its nested steps")
            })?;
            StepAction::Repeat {
                count,
                body: steps_at_depth(body, depth + 1)?,
            }
        }
        Value::Array(parts) if parts.len() == 3 => {
            let stick = parts[0]
                .as_str()
                .ok_or_else(|| CodecError::wire("W002", "Stick payload must name a stick"))?;
            let direction = parts[1]
                .as_str()
                .ok_or_else(|| CodecError::wire("W002", "Stick payload must name a direction"))?;
            let magnitude = parts[2]
                .as_f64()
                .ok_or_else(|| CodecError::wire("W002", "Stick magnitude must be a number"))?;
            StepAction::StickMove {
                stick: stick.to_string(),
                direction: direction.to_string(),
                magnitude,
            }
        }
        Value::Object(obj) if obj.get("type").and_then(Value::as_str) == Some("autoclicker") => {
            let button = obj
                .get("button")
                .and_then(Value::as_str)
                .ok_or_else(|| CodecError::wire("W002", "Autoclicker payload must name a button"))?;
            StepAction::AutoClicker {
                button: button.to_string(),
                interval_ms: obj.get("interval").and_then(Value::as_u64).unwrap_or(0),
                duration_ms: obj.get("duration").and_then(Value::as_u64).unwrap_or(0),
            }
        }
        other => {
            return Err(CodecError::wire(
                "W002",
                format!("Unrecognized step payload: {}", other),
            ));
        }
    };

    Ok(MacroStep {
        action,
        delay_ms: slots.get(1).and_then(Value::as_u64).unwrap_or(0),
        comment: slots
            .get(2)
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    })
}

// ---------------------------------------------------------------------------
// serde plumbing
// ---------------------------------------------------------------------------

/// Payload slot of a serialized step.
#[derive(Serialize)]
#[serde(untagged)]
enum PayloadRef<'a> {
    Button(&'a str),
    Stick(&'a str, &'a str, f64),
    Clicker {
        #[serde(rename = "type")]
        kind: &'static str,
        button: &'a str,
        interval: u64,
        duration: u64,
    },
    Repeat(&'static str, u32, &'a Vec<MacroStep>),
}

impl Serialize for MacroStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = match &self.action {
            // Comment steps always serialize as ["COMMENT", 0, text].
            StepAction::Comment { text } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(COMMENT_TAG)?;
                seq.serialize_element(&0u64)?;
                seq.serialize_element(text)?;
                return seq.end();
            }
            StepAction::ButtonPress { button } => PayloadRef::Button(button),
            StepAction::StickMove {
                stick,
                direction,
                magnitude,
            } => PayloadRef::Stick(stick, direction, *magnitude),
            StepAction::AutoClicker {
                button,
                interval_ms,
                duration_ms,
            } => PayloadRef::Clicker {
                kind: "autoclicker",
                button,
                interval: *interval_ms,
                duration: *duration_ms,
            },
            StepAction::Repeat { count, body } => PayloadRef::Repeat(REPEAT_TAG, *count, body),
        };

        // An absent comment drops the third slot entirely; it is never
        // written as an empty string.
        let len = if self.comment.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&payload)?;
        seq.serialize_element(&self.delay_ms)?;
        if let Some(comment) = &self.comment {
            seq.serialize_element(comment)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for MacroStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        step_from_value(&value, 0).map_err(serde::de::Error::custom)
    }
}
