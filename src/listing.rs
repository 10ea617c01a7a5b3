//! Plain-text rendering of the ordered step list for the CLI

use crate::types::Step;

/// Shown when there is nothing to do
pub const EMPTY_LISTING: &str = "No route steps yet.";

/// Render the ordered steps, one three-line card per step
pub fn render_listing(steps: &[Step]) -> String {
    if steps.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    let mut out = String::new();
    for (index, step) in steps.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&render_card(index + 1, step));
    }
    out
}

fn render_card(position: usize, step: &Step) -> String {
    let ready = if step.is_ready_for_delivery() {
        " ✓ ready"
    } else {
        ""
    };
    format!(
        "{position:>2}. [{}] {}{ready}  ({})\n    {} {}\n    {} — {}",
        step.kind.label(),
        step.location,
        step.id,
        step.mission_type.to_uppercase(),
        step.mission_name,
        step.material,
        step.containers_text,
    )
}
