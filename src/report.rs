//! Human and machine readable renderings of search outcomes.

use std::fmt::Write;

use crate::evaluator::Outcome;

/// Column headings of the results table.
const HEADERS: [&str; 5] = [
    "Height (h)",
    "Width (w)",
    "Total height (h + 2t)",
    "Distance from force applied",
    "Geometric efficiency",
];

/// Render a plain-text table with one row per feasible distance.
///
/// Efficiencies are rounded to two decimals for display only. Distances with
/// no feasible geometry are listed after the table so they cannot be mistaken
/// for a zero-efficiency design.
///
/// # Examples
/// ```
/// use ibeamx::{render_table, Outcome};
///
/// let text = render_table(&[Outcome::NoValidCombination { distance: 4000.0 }]);
/// assert!(text.contains("no feasible geometry for distance=4000"));
/// ```
#[must_use]
pub fn render_table(outcomes: &[Outcome]) -> String {
    let rows: Vec<[String; 5]> = outcomes
        .iter()
        .filter_map(Outcome::design)
        .map(|design| {
            [
                design.height.to_string(),
                design.width.to_string(),
                design.outer_height.to_string(),
                design.distance.to_string(),
                format!("{:.2}", design.efficiency),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    if !rows.is_empty() {
        let header: Vec<String> = HEADERS
            .iter()
            .zip(widths)
            .map(|(title, width)| format!("{title:<width$}"))
            .collect();
        writeln!(&mut output, "{}", header.join("  ").trim_end())
            .expect("writing to string cannot fail");

        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        writeln!(&mut output, "{}", rule.join("  ")).expect("writing to string cannot fail");

        // Numbers are right aligned so decimal places line up.
        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect();
            writeln!(&mut output, "{}", cells.join("  ")).expect("writing to string cannot fail");
        }
    }

    for outcome in outcomes {
        if let Outcome::NoValidCombination { distance } = outcome {
            writeln!(&mut output, "no feasible geometry for distance={distance}")
                .expect("writing to string cannot fail");
        }
    }

    output
}

/// Render outcomes as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialisation fails.
pub fn render_json(outcomes: &[Outcome]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcomes)
}
