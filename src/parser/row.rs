use std::fmt;

use super::numeric::{parse_money, parse_percent, parse_quantity};
use crate::error::ItemError;
use crate::model::TradingItem;

/// Fixed tail layout, right to left from the end of the line.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "avgCost",
    "lineCost",
    "quantity",
    "value",
    "profit",
    "gpPercent",
    "salesRatioPercent",
];

const MIN_TOKENS: usize = NUMERIC_COLUMNS.len() + 1;

/// Why a candidate line did not become an item.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    NoDigits,
    TooFewTokens { found: usize },
    Unparseable { column: &'static str, token: String },
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::NoDigits => write!(f, "no digits"),
            RowRejection::TooFewTokens { found } => {
                write!(f, "{} tokens, need at least {}", found, MIN_TOKENS)
            }
            RowRejection::Unparseable { column, token } => {
                write!(f, "{}: cannot read '{}'", column, token)
            }
        }
    }
}

/// Constructor errors name the offending field. The tail tokens have already
/// passed the finite check and the name has at least one token, so `classify_row`
/// never reaches this in practice.
impl From<ItemError> for RowRejection {
    fn from(err: ItemError) -> Self {
        let column = match err {
            ItemError::EmptyName => "name",
            ItemError::NonFiniteValue { field } => field,
        };
        RowRejection::Unparseable {
            column,
            token: String::new(),
        }
    }
}

pub fn parse_row(line: &str) -> Option<TradingItem> {
    classify_row(line).ok()
}

/// Name is every token before the last seven; the seven are the numeric columns.
pub fn classify_row(line: &str) -> Result<TradingItem, RowRejection> {
    if !line.chars().any(|c| c.is_ascii_digit()) {
        return Err(RowRejection::NoDigits);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(RowRejection::TooFewTokens { found: tokens.len() });
    }

    let (name_tokens, tail) = tokens.split_at(tokens.len() - NUMERIC_COLUMNS.len());
    let name = name_tokens.join(" ");

    let money = |i: usize| read(tail[i], NUMERIC_COLUMNS[i], parse_money);
    let percent = |i: usize| read(tail[i], NUMERIC_COLUMNS[i], parse_percent);

    let avg_cost = money(0)?;
    let line_cost = money(1)?;
    let quantity = read(tail[2], NUMERIC_COLUMNS[2], parse_quantity)?;
    let value = money(3)?;
    let profit = money(4)?;
    let gp_percent = percent(5)?;
    let sales_ratio_percent = percent(6)?;

    let item = TradingItem::new(
        &name,
        avg_cost,
        line_cost,
        quantity,
        value,
        profit,
        gp_percent,
        sales_ratio_percent,
    );
    debug_assert!(item.is_ok(), "row tokens passed validation: {:?}", item);
    item.map_err(RowRejection::from)
}

fn read<T>(
    token: &str,
    column: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, RowRejection> {
    parse(token).ok_or_else(|| RowRejection::Unparseable {
        column,
        token: token.to_string(),
    })
}

// ── Tests ──
