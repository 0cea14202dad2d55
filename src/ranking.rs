use std::cmp::Ordering;

use crate::model::TradingItem;

pub const DEFAULT_TOP_N: usize = 5;

/// Item with the greatest profit. Earlier items win ties: the running best is
/// only replaced by a strictly greater profit.
pub fn highest_profit(items: &[TradingItem]) -> Option<&TradingItem> {
    items.iter().fold(None::<&TradingItem>, |best, item| match best {
        Some(current) if item.profit() <= current.profit() => Some(current),
        _ => Some(item),
    })
}

/// First `n` items by sales ratio, descending. Equal ratios keep source order.
pub fn top_popular(items: &[TradingItem], n: usize) -> Vec<&TradingItem> {
    let mut ranked: Vec<&TradingItem> = items.iter().collect();
    // partial_cmp keeps -0.0 and 0.0 equal; values are finite so it never returns None
    ranked.sort_by(|a, b| {
        b.sales_ratio_percent()
            .partial_cmp(&a.sales_ratio_percent())
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

// ── Tests ──
