use macro_blocks::step::{MacroStep, StepAction};

// =============================================================================
// Step value builders
// =============================================================================

pub fn button(button: &str, delay_ms: u64) -> MacroStep {
    MacroStep::new(
        StepAction::ButtonPress {
            button: button.into(),
        },
        delay_ms,
    )
}

pub fn stick(stick: &str, direction: &str, magnitude: f64, delay_ms: u64) -> MacroStep {
    MacroStep::new(
        StepAction::StickMove {
            stick: stick.into(),
            direction: direction.into(),
            magnitude,
        },
        delay_ms,
    )
}

pub fn clicker(button: &str, interval_ms: u64, duration_ms: u64, delay_ms: u64) -> MacroStep {
    MacroStep::new(
        StepAction::AutoClicker {
            button: button.into(),
            interval_ms,
            duration_ms,
        },
        delay_ms,
    )
}

pub fn repeat(count: u32, body: Vec<MacroStep>, delay_ms: u64) -> MacroStep {
    MacroStep::new(StepAction::Repeat { count, body }, delay_ms)
}

pub fn note(text: &str) -> MacroStep {
    MacroStep::comment(text)
}

/// `depth` repeats nested inside each other, innermost holding one button
/// press.
pub fn nested_repeats(depth: usize) -> Vec<MacroStep> {
    let mut steps = vec![button("B", 0)];
    for _ in 0..depth {
        steps = vec![repeat(2, steps, 0)];
    }
    steps
}

/// A sequence touching every step shape, with a depth-3 repeat nest.
pub fn kitchen_sink() -> Vec<MacroStep> {
    vec![
        note("warm up"),
        button("CROSS", 100),
        stick("LEFT_STICK", "UP", 0.5, 50).with_comment("nudge forward"),
        clicker("R2", 40, 2000, 0),
        repeat(
            3,
            vec![
                button("SQUARE", 10),
                repeat(2, vec![repeat(5, vec![button("L1", 0)], 0)], 25),
            ],
            0,
        ),
        button("OPTIONS", 500).with_comment("open menu"),
    ]
}
