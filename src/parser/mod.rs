pub mod lines;
pub mod numeric;
pub mod row;

use crate::error::ReportError;
use crate::model::{TradingItem, TradingParseResult};
use row::RowRejection;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Three-pass pipeline: text → normalized lines → candidate lines → items.
/// Lines that don't parse are dropped; they are never an error.
pub fn parse(text: &str) -> Vec<TradingItem> {
    let lines = lines::normalize_lines(text);
    lines::candidate_lines(&lines)
        .iter()
        .filter_map(|l| row::parse_row(l))
        .collect()
}

/// UTF-8 text with any leading byte-order mark removed.
pub fn decode_text(bytes: &[u8]) -> Result<&str, ReportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    Ok(std::str::from_utf8(bytes)?)
}

/// Same as [`parse`] for raw bytes. Fails only when the bytes are not UTF-8
/// text, which is distinct from a document with no matching rows.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<TradingItem>, ReportError> {
    Ok(parse(decode_text(bytes)?))
}

pub fn parse_report(text: &str, top_n: usize) -> TradingParseResult {
    TradingParseResult::from_items(parse(text), top_n)
}

/// Per-line outcome for every candidate line, for diagnostics.
#[derive(Debug)]
pub struct Inspection {
    pub header: Option<String>,
    pub rows: Vec<(String, Result<TradingItem, RowRejection>)>,
}

impl Inspection {
    pub fn accepted(&self) -> usize {
        self.rows.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn rejected(&self) -> usize {
        self.rows.len() - self.accepted()
    }
}

pub fn inspect(text: &str) -> Inspection {
    let lines = lines::normalize_lines(text);
    let header = lines::find_header(&lines).map(|h| lines[h].clone());
    let rows = lines::candidate_lines(&lines)
        .iter()
        .map(|l| (l.clone(), row::classify_row(l)))
        .collect();
    Inspection { header, rows }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.txt", name)).unwrap()
    }

    #[test]
    fn single_row_without_header() {
        let items = parse("Widget A   1.50   1.50   10   15.00   3.00   20%   5%");
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0],
            TradingItem::new("Widget A", 1.5, 1.5, 10, 15.0, 3.0, 20.0, 5.0).unwrap()
        );
    }

    #[test]
    fn header_then_valid_and_short_row() {
        let text = "Item Avg Cost Line Cost Quantity Value Profit GP% Sales Ratio%\n\
                    Widget A 1.50 1.50 10 15.00 3.00 20% 5%\n\
                    Widget B 10 15.00 3.00 20%";
        let items = parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "Widget A");
    }

    #[test]
    fn rows_above_header_are_ignored() {
        let text = "Stray 1 1 1 1 1 1% 1%\n\
                    Item Avg Cost Line Cost Quantity Value Profit GP% Sales Ratio%\n\
                    Kept 2 2 2 2 2 2% 2%";
        let names: Vec<_> = parse(text).iter().map(|i| i.name().to_string()).collect();
        assert_eq!(names, vec!["Kept"]);
    }

    #[test]
    fn no_digits_anywhere() {
        let result = parse_report("Monthly Trading Report\nNo sales recorded\n", 5);
        assert!(result.items.is_empty());
        assert!(result.highest_profit.is_none());
        assert!(result.top_popular.is_empty());
    }

    #[test]
    fn fallback_without_header() {
        let text = "Riverside Social Club\nPrinted 2024\nCider 1.00 20.00 20 60.00 40.00 66.7% 10%";
        let items = parse(text);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "Cider");
    }

    #[test]
    fn crlf_and_nbsp_input() {
        let text = "Widget\u{a0}A\u{a0}1.50 1.50 10 15.00 3.00 20% 5%\r\nWidget B 1 1 1 1 1 1% 1%\r\n";
        let names: Vec<_> = parse(text).iter().map(|i| i.name().to_string()).collect();
        assert_eq!(names, vec!["Widget A", "Widget B"]);
    }

    #[test]
    fn text_with_bom_keeps_clean_name() {
        let items = parse("\u{feff}Widget A 1.50 1.50 10 15.00 3.00 20% 5%");
        assert_eq!(items[0].name(), "Widget A");
    }

    #[test]
    fn bytes_with_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"Widget A 1.50 1.50 10 15.00 3.00 20% 5%");
        let items = parse_bytes(&bytes).unwrap();
        assert_eq!(items[0].name(), "Widget A");
    }

    #[test]
    fn decode_text_strips_only_leading_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFabc").unwrap(), "abc");
        assert_eq!(decode_text(b"abc").unwrap(), "abc");
        assert!(matches!(decode_text(b"\xEF\xBB"), Err(ReportError::NotText(_))));
    }

    #[test]
    fn non_text_is_a_hard_failure() {
        let err = parse_bytes(&[0x25, 0x50, 0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ReportError::NotText(_)));
        // zero rows is not an error
        assert!(parse_bytes(b"nothing to see").unwrap().is_empty());
    }

    #[test]
    fn bar_sales_fixture() {
        let result = parse_report(&fixture("bar_sales"), 5);
        let names: Vec<&str> = result.items.iter().map(|i| i.name()).collect();
        assert_eq!(
            names,
            vec![
                "Carling Pint",
                "Guinness Pint",
                "Red Wine 175ml",
                "Crisps Ready Salted",
                "Soda Water",
                "Bottled Cider",
                "Gin & Tonic",
                "Raffle Tickets",
            ]
        );

        let best = result.highest_profit.as_ref().unwrap();
        assert_eq!(best.name(), "Carling Pint");
        assert_eq!(best.profit(), 1287.5);

        let popular: Vec<&str> = result.top_popular.iter().map(|i| i.name()).collect();
        assert_eq!(
            popular,
            vec![
                "Carling Pint",
                "Guinness Pint",
                "Gin & Tonic",
                "Red Wine 175ml",
                "Bottled Cider",
            ]
        );

        let soda = &result.items[4];
        assert_eq!(soda.profit(), -12.0);
        assert_eq!(soda.avg_cost(), -0.1);
    }

    #[test]
    fn bar_sales_inspection() {
        let inspection = inspect(&fixture("bar_sales"));
        assert!(inspection.header.is_some());
        assert_eq!(inspection.accepted(), 8);
        assert!(inspection
            .rows
            .iter()
            .any(|(_, r)| matches!(r, Err(RowRejection::NoDigits))));
        assert!(inspection
            .rows
            .iter()
            .any(|(_, r)| matches!(r, Err(RowRejection::TooFewTokens { .. }))));
    }

    #[test]
    fn headerless_fixture() {
        let inspection = inspect(&fixture("headerless"));
        assert!(inspection.header.is_none());
        let items = parse(&fixture("headerless"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].quantity(), 1250);
    }

    #[test]
    fn idempotent() {
        let text = fixture("bar_sales");
        assert_eq!(parse(&text), parse(&text));
    }

    fn arb_line() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z ]{0,30}",
            "[A-Za-z]{1,8}( [-(£$]?[0-9,.]{1,6}[)%]?){7}",
            "[A-Za-z]{1,8}( [0-9]{1,3}){7}",
            "[ -~\u{a0}]{0,60}",
        ]
    }

    proptest! {
        #[test]
        fn items_bounded_and_valid(raw_lines in prop::collection::vec(arb_line(), 0..12)) {
            let text = raw_lines.join("\n");
            let items = parse(&text);
            let normalized = lines::normalize_lines(&text);
            prop_assert!(items.len() <= lines::candidate_lines(&normalized).len());
            for item in &items {
                prop_assert!(!item.name().trim().is_empty());
                prop_assert!(item.avg_cost().is_finite());
                prop_assert!(item.line_cost().is_finite());
                prop_assert!(item.value().is_finite());
                prop_assert!(item.profit().is_finite());
                prop_assert!(item.gp_percent().is_finite());
                prop_assert!(item.sales_ratio_percent().is_finite());
            }
            prop_assert_eq!(parse(&text), items);
        }
    }
}
