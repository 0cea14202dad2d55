//! Tolerant parser for the sales table in trading reports, plus profit and
//! popularity rankings over the parsed items.

pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod ranking;
pub mod response;
pub mod settings;

pub use error::{ItemError, ReportError};
pub use model::{TradingItem, TradingParseResult};
pub use parser::{parse, parse_bytes, parse_report};
pub use ranking::{highest_profit, top_popular};
