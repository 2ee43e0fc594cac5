//! Display strings for observations. All markdown bold and page-anchor
//! decisions live here; extractors only decide which text goes where.

pub const MISSING: &str = "N/A";

pub fn bold(text: &str) -> String {
    format!("**{}**", text)
}

/// `**FIRST** rest of line`
pub fn bold_first_word(line: &str) -> String {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((first, rest)) => format!("{} {}", bold(first), rest.trim_start()),
        None => bold(line),
    }
}

pub fn allergy(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|l| bold_first_word(l))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn medication(date: &str, name: &str, dose: &str) -> String {
    if dose.is_empty() {
        format!("{} {}", date, bold(name))
    } else {
        format!("{} {} {}", date, bold(name), bold(dose))
    }
}

pub fn clinical_note(date: &str, kind: Option<&str>, author: Option<&str>) -> String {
    format!(
        "{} {} by {}",
        date,
        bold(kind.unwrap_or(MISSING)),
        bold(author.unwrap_or(MISSING))
    )
}

pub fn listed(date: &str, line: &str) -> String {
    format!("{} {}", date, bold(line))
}

pub fn line_count(n: usize) -> String {
    if n == 1 {
        "1 line".to_string()
    } else {
        format!("{} lines", n)
    }
}

/// `date (N lines)`, linked to the source page when one is known.
pub fn measured(date: &str, lines: usize, page: Option<u32>) -> String {
    let label = format!("{} ({})", date, line_count(lines));
    match page {
        Some(p) => page_link(&label, p),
        None => label,
    }
}

pub fn page_link(label: &str, page: u32) -> String {
    format!("[{}](#page={})", label, page)
}
