//! Encode phase: macro steps → linked block chain.

use super::MAX_NESTING_DEPTH;
use crate::error::CodecError;
use crate::graph::{BlockKind, GraphAdapter, field};
use crate::step::{MacroStep, StepAction};

/// Materialize `steps` as a chain of linked blocks, returning the head (or
/// `None` for an empty sequence). Nodes are created in step order, outer
/// chain before the nested body of a repeat, so an editor watching node
/// creation sees a deterministic left-to-right build.
pub fn encode<A: GraphAdapter>(
    adapter: &mut A,
    steps: &[MacroStep],
) -> Result<Option<A::Node>, CodecError> {
    encode_chain(adapter, steps, 0)
}

fn encode_chain<A: GraphAdapter>(
    adapter: &mut A,
    steps: &[MacroStep],
    depth: usize,
) -> Result<Option<A::Node>, CodecError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CodecError::encode(
            "E001",
            format!("Repeat nesting exceeds {} levels", MAX_NESTING_DEPTH),
            None,
        ));
    }

    let mut head = None;
    let mut prev: Option<A::Node> = None;
    for step in steps {
        let node = encode_step(adapter, step, depth)?;
        match prev {
            Some(p) => adapter.link_next(p, node),
            None => head = Some(node),
        }
        prev = Some(node);
    }
    Ok(head)
}

fn encode_step<A: GraphAdapter>(
    adapter: &mut A,
    step: &MacroStep,
    depth: usize,
) -> Result<A::Node, CodecError> {
    let node = match &step.action {
        StepAction::ButtonPress { button } => {
            let node = adapter.create_node(BlockKind::Button);
            adapter.set_field(node, field::BUTTON, button);
            node
        }
        StepAction::StickMove {
            stick,
            direction,
            magnitude,
        } => {
            let node = adapter.create_node(BlockKind::Stick);
            adapter.set_field(node, field::STICK, stick);
            adapter.set_field(node, field::DIRECTION, direction);
            adapter.set_field(node, field::MAGNITUDE, &magnitude.to_string());
            node
        }
        StepAction::AutoClicker {
            button,
            interval_ms,
            duration_ms,
        } => {
            let node = adapter.create_node(BlockKind::AutoClicker);
            adapter.set_field(node, field::BUTTON, button);
            adapter.set_field(node, field::INTERVAL, &interval_ms.to_string());
            adapter.set_field(node, field::DURATION, &duration_ms.to_string());
            node
        }
        StepAction::Repeat { count, body } => {
            let node = adapter.create_node(BlockKind::Repeat);
            adapter.set_field(node, field::COUNT, &count.to_string());
            // Body chain is built after its repeat node exists; an empty
            // body leaves the body slot unlinked.
            if let Some(body_head) = encode_chain(adapter, body, depth + 1)? {
                adapter.set_body_head(node, body_head);
            }
            node
        }
        StepAction::Comment { text } => {
            let node = adapter.create_node(BlockKind::Comment);
            adapter.set_field(node, field::COMMENT, text);
            // No delay or attached comment on comment blocks.
            return Ok(node);
        }
    };

    adapter.set_field(node, field::DELAY_MS, &step.delay_ms.to_string());
    // Absent comments leave the field unset rather than writing "".
    if let Some(comment) = &step.comment {
        adapter.set_field(node, field::COMMENT, comment);
    }
    Ok(node)
}
