//! Presentation helpers around the parsed categories. The expanded-category
//! set belongs to the caller: it is passed in and a new one handed back.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::parser::extract::CategoryKind;
use crate::parser::model::Category;
use crate::parser::out_of_range::repair_label;

pub fn toggle_expanded(expanded: &BTreeSet<String>, name: &str) -> BTreeSet<String> {
    let mut next = expanded.clone();
    if !next.remove(name) {
        next.insert(name.to_string());
    }
    next
}

/// Drop names that no longer match a category after a re-parse.
pub fn retain_known(expanded: &BTreeSet<String>, categories: &[Category]) -> BTreeSet<String> {
    expanded
        .iter()
        .filter(|n| categories.iter().any(|c| &c.name == *n))
        .cloned()
        .collect()
}

/// Medication observations as newline-separated input for an external summarizer.
pub fn medication_summary_input(categories: &[Category]) -> Option<String> {
    let mut meds = categories
        .iter()
        .filter(|c| CategoryKind::resolve(&c.name) == CategoryKind::Medications)
        .peekable();
    meds.peek()?;
    let lines: Vec<&str> = meds
        .flat_map(|c| c.observations.iter().map(|o| o.display.as_str()))
        .collect();
    Some(lines.join("\n"))
}

pub fn render_summary(categories: &[Category], expanded: &BTreeSet<String>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3} | {:<28} | {:>5} | {:<11} | {:<28}\n",
        "#", "Category", "Obs", "Lines", "Key"
    ));
    out.push_str(&format!("{}\n", "-".repeat(86)));

    for (i, c) in categories.iter().enumerate() {
        let marker = if expanded.contains(&c.name) { "-" } else { "+" };
        out.push_str(&format!(
            "{:>3} | {} {:<26} | {:>5} | {:<11} | {:<28}\n",
            i + 1,
            marker,
            fit_column(&c.name, 26),
            c.observation_count,
            format!("{}-{}", c.start_line, c.end_line),
            fit_column(&c.file_key(), 28),
        ));
        if !expanded.contains(&c.name) {
            continue;
        }
        for o in &c.observations {
            let page = o.page.map(|p| format!("p.{}", p)).unwrap_or_else(|| "-".into());
            out.push_str(&format!("      {:>5}  {}\n", page, o.display));
            for flagged in o.out_of_range_lines.iter().flatten() {
                out.push_str(&format!("             ! {}\n", repair_label(flagged)));
            }
        }
    }
    out
}

/// Clip a cell so it never spills past its column; clipped text ends in `…`.
fn fit_column(cell: &str, width: usize) -> Cow<'_, str> {
    if cell.chars().count() <= width {
        return Cow::Borrowed(cell);
    }
    let mut clipped: String = cell.chars().take(width.saturating_sub(1)).collect();
    clipped.truncate(clipped.trim_end().len());
    clipped.push('…');
    Cow::Owned(clipped)
}
