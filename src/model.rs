use serde::Serialize;

use crate::error::ItemError;
use crate::ranking;

/// One parsed sales line.
///
/// Only constructed through [`TradingItem::new`], so every instance has a
/// non-empty name and finite numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingItem {
    name: String,
    avg_cost: f64,
    line_cost: f64,
    quantity: i64,
    value: f64,
    profit: f64,
    gp_percent: f64,
    sales_ratio_percent: f64,
}

impl TradingItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        avg_cost: f64,
        line_cost: f64,
        quantity: i64,
        value: f64,
        profit: f64,
        gp_percent: f64,
        sales_ratio_percent: f64,
    ) -> Result<Self, ItemError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ItemError::EmptyName);
        }

        let decimals = [
            ("avgCost", avg_cost),
            ("lineCost", line_cost),
            ("value", value),
            ("profit", profit),
            ("gpPercent", gp_percent),
            ("salesRatioPercent", sales_ratio_percent),
        ];
        if let Some((field, _)) = decimals.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ItemError::NonFiniteValue { field: *field });
        }

        Ok(TradingItem {
            name: name.to_string(),
            avg_cost,
            line_cost,
            quantity,
            value,
            profit,
            gp_percent,
            sales_ratio_percent,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn avg_cost(&self) -> f64 {
        self.avg_cost
    }

    pub fn line_cost(&self) -> f64 {
        self.line_cost
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn profit(&self) -> f64 {
        self.profit
    }

    pub fn gp_percent(&self) -> f64 {
        self.gp_percent
    }

    pub fn sales_ratio_percent(&self) -> f64 {
        self.sales_ratio_percent
    }
}

/// Items in source order plus the two ranking aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingParseResult {
    pub items: Vec<TradingItem>,
    pub highest_profit: Option<TradingItem>,
    pub top_popular: Vec<TradingItem>,
}

impl TradingParseResult {
    pub fn from_items(items: Vec<TradingItem>, top_n: usize) -> Self {
        let highest_profit = ranking::highest_profit(&items).cloned();
        let top_popular = ranking::top_popular(&items, top_n)
            .into_iter()
            .cloned()
            .collect();
        TradingParseResult {
            items,
            highest_profit,
            top_popular,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ── Tests ──
