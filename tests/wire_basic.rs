//! Integration tests for the storage wire format: payload classification,
//! lenient delay slots, strict payload shapes, record round-trips.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use macro_blocks::codec::{MAX_NESTING_DEPTH, decode, encode};
use macro_blocks::graph::BlockGraph;
use macro_blocks::step::wire::{parse_record, parse_steps, steps_from_value};
use macro_blocks::step::{MacroRecord, StepAction};
use serde_json::json;

#[test]
fn parses_the_canonical_example() {
    let json = r#"[["A", 100], [["LEFT_STICK","UP",0.5], 50, "nudge"], [["REPEAT", 3, [["B", 0]]], 0]]"#;
    let steps = parse_steps(json).expect("Should parse");
    assert_eq!(
        steps,
        vec![
            button("A", 100),
            stick("LEFT_STICK", "UP", 0.5, 50).with_comment("nudge"),
            repeat(3, vec![button("B", 0)], 0),
        ]
    );

    // Encoding the parsed sequence and decoding the graph reproduces it.
    let mut g = BlockGraph::new();
    let head = encode(&mut g, &steps).expect("Should encode");
    assert_eq!(decode(&g, head).expect("Should decode"), steps);
}

#[test]
fn comment_step_ignores_an_erroneous_delay_slot() {
    let steps = parse_steps(r#"[["COMMENT", 999, "checkpoint"]]"#).expect("Should parse");
    assert_eq!(steps, vec![note("checkpoint")]);
    assert_eq!(steps[0].delay_ms, 0);
}

#[test]
fn missing_delay_and_comment_slots_are_tolerated() {
    let steps = parse_steps(r#"[["A"], ["B", 20, ""]]"#).expect("Should parse");
    assert_eq!(steps, vec![button("A", 0), button("B", 20)]);
    // Empty-string comment slot reads the same as an absent one.
    assert_eq!(steps[1].comment, None);
}

#[test]
fn autoclicker_payload_parses_with_lenient_numbers() {
    let steps = parse_steps(r#"[[{"type": "autoclicker", "button": "R2", "interval": 40}, 10]]"#)
        .expect("Should parse");
    assert_eq!(steps, vec![clicker("R2", 40, 0, 10)]);
}

#[test]
fn unrecognized_payload_shapes_fail_the_whole_parse() {
    for bad in [
        r#"[[123, 0]]"#,
        r#"[[{"type": "turbo", "button": "R2"}, 0]]"#,
        r#"[[["LEFT_STICK", "UP"], 0]]"#,
        r#"[[["REPEAT", -1, []], 0]]"#,
        r#"[["A", 0], [[], 0]]"#,
    ] {
        let err = parse_steps(bad).expect_err("Should fail");
        assert_eq!(err.code, "W002", "input {}", bad);
    }
}

#[test]
fn repeat_nesting_past_the_bound_fails_the_parse() {
    let mut value = json!([["B", 0]]);
    for _ in 0..=MAX_NESTING_DEPTH {
        value = json!([[["REPEAT", 1, value], 0]]);
    }

    let err = steps_from_value(&value).expect_err("Should fail");
    assert_eq!(err.code, "W004");
}

#[test]
fn repeat_nesting_inside_the_bound_parses() {
    let steps = nested_repeats(50);
    let value = serde_json::to_value(&steps).expect("Should serialize");
    assert_eq!(steps_from_value(&value).expect("Should parse"), steps);
}

#[test]
fn invalid_json_is_a_wire_error() {
    let err = parse_steps("not json").expect_err("Should fail");
    assert_eq!(err.code, "W001");
}

#[test]
fn serializes_two_or_three_slots_depending_on_comment() {
    let value = serde_json::to_value(vec![
        button("A", 100),
        button("B", 0).with_comment("hold"),
        note("checkpoint"),
    ])
    .expect("Should serialize");

    assert_eq!(
        value,
        json!([
            ["A", 100],
            ["B", 0, "hold"],
            ["COMMENT", 0, "checkpoint"],
        ])
    );
}

#[test]
fn serializes_structured_payloads() {
    let value = serde_json::to_value(vec![
        stick("LEFT_STICK", "UP", 0.5, 50).with_comment("nudge"),
        clicker("R2", 40, 2000, 0),
        repeat(3, vec![button("B", 0)], 0),
    ])
    .expect("Should serialize");

    assert_eq!(
        value,
        json!([
            [["LEFT_STICK", "UP", 0.5], 50, "nudge"],
            [{"type": "autoclicker", "button": "R2", "interval": 40, "duration": 2000}, 0],
            [["REPEAT", 3, [["B", 0]]], 0],
        ])
    );
}

#[test]
fn wire_shape_snapshot() {
    let steps = vec![button("A", 100), note("checkpoint")];
    insta::assert_json_snapshot!(steps, @r###"
    [
      [
        "A",
        100
      ],
      [
        "COMMENT",
        0,
        "checkpoint"
      ]
    ]
    "###);
}

#[test]
fn macro_record_round_trips() {
    let record = MacroRecord {
        name: "farm loop".into(),
        description: Some("harvest and replant".into()),
        steps: kitchen_sink(),
        end_of_loop_macro_name: Some("reset camera".into()),
    };

    let json = serde_json::to_string(&record).expect("Should serialize");
    let parsed = parse_record(&json).expect("Should parse");
    assert_eq!(parsed, record);
}

#[test]
fn macro_record_optional_fields_default() {
    let record = parse_record(r#"{"name": "empty"}"#).expect("Should parse");
    assert_eq!(record.name, "empty");
    assert_eq!(record.description, None);
    assert!(record.steps.is_empty());
    assert_eq!(record.end_of_loop_macro_name, None);

    // Absent optional fields stay absent on the way back out.
    let value = serde_json::to_value(&record).expect("Should serialize");
    assert_eq!(value, json!({"name": "empty", "steps": []}));
}

#[test]
fn repeat_body_steps_nest_recursively_in_records() {
    let json = r#"{
        "name": "nested",
        "steps": [[["REPEAT", 2, [[["REPEAT", 3, [["A", 5]]], 0]]], 10, "outer"]]
    }"#;
    let record = parse_record(json).expect("Should parse");
    assert_eq!(
        record.steps,
        vec![repeat(2, vec![repeat(3, vec![button("A", 5)], 0)], 10).with_comment("outer")]
    );

    match &record.steps[0].action {
        StepAction::Repeat { count, .. } => assert_eq!(*count, 2),
        other => panic!("Expected repeat, got {:?}", other),
    }
}
