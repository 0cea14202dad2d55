use std::sync::LazyLock;

use regex::Regex;

static PAREN_NEGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\((.*)\)$").unwrap());

const MONEY_NOISE: &[char] = &[',', '£', '$'];

/// Money column: `£1,234.50`, `$3`, `(2.00)` / `£(1.00)` for negatives.
pub fn parse_money(token: &str) -> Option<f64> {
    let stripped: String = token.chars().filter(|c| !MONEY_NOISE.contains(c)).collect();
    let signed = match PAREN_NEGATIVE_RE.captures(&stripped) {
        Some(caps) => format!("-{}", &caps[1]),
        None => stripped,
    };
    finite(signed.parse::<f64>().ok()?)
}

/// Quantity column. Thousands separators only; parentheses are not read as a sign.
pub fn parse_quantity(token: &str) -> Option<i64> {
    token.replace(',', "").parse::<i64>().ok()
}

/// Percentage column, kept on the 0–100 scale: `12.5%` → 12.5.
pub fn parse_percent(token: &str) -> Option<f64> {
    let stripped = token.strip_suffix('%').unwrap_or(token).replace(',', "");
    finite(stripped.parse::<f64>().ok()?)
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

// ── Tests ──
