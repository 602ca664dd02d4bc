//! Script step reference, printed by `snapruler --help`.

/// Documentation for one script step.
#[derive(Debug, Clone)]
pub struct StepDoc {
    pub example: &'static str,
    pub description: &'static str,
}

impl StepDoc {
    pub const fn new(example: &'static str, description: &'static str) -> Self {
        Self { example, description }
    }
}

/// Registry of every step a script may contain.
pub struct StepRegistry;

impl StepRegistry {
    /// Get all documented steps.
    pub fn all() -> Vec<StepDoc> {
        vec![
            StepDoc::new(r#"{"op":"tool","tool":"Ruler"}"#, "Select an instrument"),
            StepDoc::new(r#"{"op":"down","x":0,"y":0}"#, "Press the pointer"),
            StepDoc::new(r#"{"op":"move","x":10,"y":0}"#, "Move the pointer"),
            StepDoc::new(r#"{"op":"up","x":10,"y":0}"#, "Release the pointer"),
            StepDoc::new(r#"{"op":"cancel"}"#, "Abort the current gesture"),
            StepDoc::new(r#"{"op":"wait","ms":700}"#, "Advance the clock (long press)"),
            StepDoc::new(r#"{"op":"undo"}"#, "Undo"),
            StepDoc::new(r#"{"op":"redo"}"#, "Redo"),
            StepDoc::new(r#"{"op":"toggle_snap"}"#, "Toggle snapping"),
            StepDoc::new(r#"{"op":"scale","value":2.0}"#, "Set the zoom scale"),
        ]
    }

    /// Print usage and all steps to the console.
    pub fn print_all() {
        println!("Usage: snapruler <script.json> [--config <config.json>]");
        println!("\n=== Script Steps ===");
        for step in Self::all() {
            println!("  {:32} {}", step.example, step.description);
        }
        println!("\nTools: Pen, Ruler, SetSquare45, SetSquare3060, Protractor, Compass");
    }
}
