//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::codec;
use crate::error::CodecError;
use crate::graph::{BlockGraph, GraphDto};
use crate::step::{MacroStep, wire};

/// Encode a stored step array JSON into a block graph the editor can
/// materialize. Returns `{status: "success", graph}` or
/// `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn steps_to_graph(steps_json: &str) -> JsValue {
    let result = steps_to_graph_inner(steps_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn steps_to_graph_inner(steps_json: &str) -> GraphResult {
    let steps = match wire::parse_steps(steps_json) {
        Ok(s) => s,
        Err(e) => return GraphResult::Errors { errors: vec![e.into()] },
    };

    let mut graph = BlockGraph::new();
    match codec::encode(&mut graph, &steps) {
        Ok(head) => GraphResult::Success {
            graph: graph.to_dto(head),
        },
        Err(e) => GraphResult::Errors { errors: vec![e.into()] },
    }
}

/// Decode a serialized block graph back into the canonical step array.
/// Returns `{status: "success", steps}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn graph_to_steps(graph_json: &str) -> JsValue {
    let result = graph_to_steps_inner(graph_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn graph_to_steps_inner(graph_json: &str) -> StepsResult {
    let dto = match serde_json::from_str::<GraphDto>(graph_json) {
        Ok(d) => d,
        Err(e) => {
            return StepsResult::Errors {
                errors: vec![
                    CodecError::wire("W001", format!("Failed to parse graph JSON: {}", e)).into(),
                ],
            };
        }
    };

    let (graph, head) = match BlockGraph::from_dto(&dto) {
        Ok(pair) => pair,
        Err(e) => return StepsResult::Errors { errors: vec![e.into()] },
    };

    match codec::decode(&graph, head) {
        Ok(steps) => StepsResult::Success { steps },
        Err(e) => StepsResult::Errors { errors: vec![e.into()] },
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    node_id: Option<String>,
}

impl From<CodecError> for ErrorDto {
    fn from(e: CodecError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            node_id: e.node_id,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum GraphResult {
    #[serde(rename = "success")]
    Success { graph: GraphDto },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum StepsResult {
    #[serde(rename = "success")]
    Success { steps: Vec<MacroStep> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
