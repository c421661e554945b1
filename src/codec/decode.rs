//! Decode phase: block graph → ordered macro steps.

use std::collections::HashSet;

use super::MAX_NESTING_DEPTH;
use crate::error::CodecError;
use crate::graph::{BlockKind, GraphAdapter, field};
use crate::step::{MacroStep, StepAction};

/// Walk the chain starting at `head` and produce its step sequence in chain
/// order, recursing into the body slot of every repeat block. A head of
/// `None` yields an empty sequence.
pub fn decode<A: GraphAdapter>(
    adapter: &A,
    head: Option<A::Node>,
) -> Result<Vec<MacroStep>, CodecError> {
    let mut visited = HashSet::new();
    decode_chain(adapter, head, 0, &mut visited)
}

fn decode_chain<A: GraphAdapter>(
    adapter: &A,
    head: Option<A::Node>,
    depth: usize,
    visited: &mut HashSet<A::Node>,
) -> Result<Vec<MacroStep>, CodecError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CodecError::decode(
            "D003",
            format!("Repeat nesting exceeds {} levels", MAX_NESTING_DEPTH),
            None,
        ));
    }

    let mut steps = Vec::new();
    let mut cursor = head;
    while let Some(node) = cursor {
        // A well-formed graph visits every node once; a revisit means the
        // links loop back on themselves, and following them would never
        // terminate.
        if !visited.insert(node) {
            return Err(CodecError::decode(
                "D004",
                "Chain links form a cycle",
                Some(adapter.kind(node)),
            ));
        }
        // Unrecognized kinds are skipped, not errors: a macro saved against
        // a newer block set must still load into everything it can.
        if let Some(kind) = BlockKind::from_name(&adapter.kind(node)) {
            steps.push(decode_node(adapter, node, kind, depth, visited)?);
        }
        cursor = adapter.next(node);
    }
    Ok(steps)
}

fn decode_node<A: GraphAdapter>(
    adapter: &A,
    node: A::Node,
    kind: BlockKind,
    depth: usize,
    visited: &mut HashSet<A::Node>,
) -> Result<MacroStep, CodecError> {
    let action = match kind {
        BlockKind::Button => StepAction::ButtonPress {
            button: text_field(adapter, node, field::BUTTON),
        },
        BlockKind::Stick => StepAction::StickMove {
            stick: text_field(adapter, node, field::STICK),
            direction: text_field(adapter, node, field::DIRECTION),
            magnitude: magnitude_field(adapter, node)?,
        },
        BlockKind::AutoClicker => StepAction::AutoClicker {
            button: text_field(adapter, node, field::BUTTON),
            interval_ms: int_field(adapter, node, field::INTERVAL),
            duration_ms: int_field(adapter, node, field::DURATION),
        },
        BlockKind::Repeat => StepAction::Repeat {
            count: count_field(adapter, node)?,
            body: decode_chain(adapter, adapter.body_head(node), depth + 1, visited)?,
        },
        BlockKind::Comment => {
            // Comment blocks never fire with a delay and never carry an
            // attached comment, whatever fields the editor stored.
            return Ok(MacroStep::comment(text_field(adapter, node, field::COMMENT)));
        }
    };

    Ok(MacroStep {
        action,
        delay_ms: int_field(adapter, node, field::DELAY_MS),
        comment: adapter
            .field(node, field::COMMENT)
            .filter(|c| !c.is_empty()),
    })
}

fn text_field<A: GraphAdapter>(adapter: &A, node: A::Node, name: &str) -> String {
    adapter.field(node, name).unwrap_or_default()
}

/// Lenient integer fields (delay, interval, duration): unset, empty, or
/// unparsable values all read as 0.
fn int_field<A: GraphAdapter>(adapter: &A, node: A::Node, name: &str) -> u64 {
    adapter
        .field(node, name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// A stick magnitude has no safe default; an unparsable value fails the
/// decode rather than smuggling a NaN into the step sequence.
fn magnitude_field<A: GraphAdapter>(adapter: &A, node: A::Node) -> Result<f64, CodecError> {
    let raw = text_field(adapter, node, field::MAGNITUDE);
    raw.trim().parse().map_err(|_| {
        CodecError::decode(
            "D001",
            format!("Stick magnitude '{}' is not a number", raw),
            Some(BlockKind::Stick.name().to_string()),
        )
    })
}

/// Repeat counts likewise fail fast; the unsigned parse also rejects
/// negative counts.
fn count_field<A: GraphAdapter>(adapter: &A, node: A::Node) -> Result<u32, CodecError> {
    let raw = text_field(adapter, node, field::COUNT);
    raw.trim().parse().map_err(|_| {
        CodecError::decode(
            "D002",
            format!("Repeat count '{}' is not a non-negative integer", raw),
            Some(BlockKind::Repeat.name().to_string()),
        )
    })
}
