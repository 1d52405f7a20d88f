//! Table output for the plan command

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use landing::{Plan, RouteDecision};

const PLAN_HEADERS: [&str; 4] = ["UPLOAD", "FILE", "DECISION", "TARGET"];

/// One row per routing decision, grouped by upload
pub fn plan_table(plan: &Plan) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(PLAN_HEADERS.iter().map(|h| Cell::new(h).fg(Color::Cyan)));

    for upload in &plan.uploads {
        for decision in &upload.decisions {
            table.add_row(vec![
                Cell::new(&upload.upload),
                Cell::new(decision.file_name()),
                Cell::new(decision.label()).fg(decision_color(decision)),
                Cell::new(decision_target(decision)),
            ]);
        }
    }
    table
}

fn decision_color(decision: &RouteDecision) -> Color {
    match decision {
        RouteDecision::Routed(_) => Color::Green,
        RouteDecision::Control { .. } => Color::Grey,
        RouteDecision::Unmatched { .. } => Color::Yellow,
        RouteDecision::Rejected { .. } => Color::Red,
    }
}

/// Destination for routed files, the reason for rejected ones
fn decision_target(decision: &RouteDecision) -> String {
    match decision {
        RouteDecision::Routed(route) => route.destination.display().to_string(),
        RouteDecision::Rejected { reason, .. } => reason.clone(),
        RouteDecision::Control { .. } | RouteDecision::Unmatched { .. } => String::new(),
    }
}
