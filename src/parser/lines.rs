const HEADER_REQUIRED: &[&str] = &["avg", "cost", "line", "quantity", "value", "profit"];
const HEADER_GP: &[&str] = &["gp", "gp%"];
const HEADER_SALES: &[&str] = &["sales", "ratio"];

/// Split text into trimmed, non-empty lines. Handles `\n` and `\r\n`, drops a
/// leading byte-order mark and turns non-breaking spaces into plain ones.
pub fn normalize_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .map(|l| l.replace('\u{a0}', " ").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Keyword test for the column header row. Column order and extra words
/// don't matter as long as every keyword group is present.
pub fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_REQUIRED.iter().all(|kw| lower.contains(kw))
        && HEADER_GP.iter().any(|kw| lower.contains(kw))
        && HEADER_SALES.iter().any(|kw| lower.contains(kw))
}

pub fn find_header(lines: &[String]) -> Option<usize> {
    lines.iter().position(|l| is_header(l))
}

/// Lines after the header, or every line when no header was found.
pub fn candidate_lines(lines: &[String]) -> &[String] {
    match find_header(lines) {
        Some(h) => &lines[h + 1..],
        None => lines,
    }
}

// ── Tests ──
