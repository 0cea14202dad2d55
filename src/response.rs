//! Upload handling: base64 payload → extracted text → parsed items → JSON body.
//!
//! Transport-free; an HTTP layer only has to copy `status` and serialize `body`.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ReportError;
use crate::extract::TextExtractor;
use crate::model::{TradingItem, TradingParseResult};
use crate::parser;

/// Standard alphabet; accepts payloads with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub const NO_ITEMS_MESSAGE: &str = "No trading items could be found in the uploaded document";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitItem {
    pub name: String,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopularItem {
    pub name: String,
    pub quantity: i64,
}

/// 200 body. `error` is only present for the empty-document case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub highest_profit_item: Option<ProfitItem>,
    pub most_popular_items: Vec<PopularItem>,
}

impl ReportResponse {
    /// An empty result still answers 200, with an explanatory `error` string.
    pub fn from_result(result: &TradingParseResult) -> Self {
        let error = result.is_empty().then(|| NO_ITEMS_MESSAGE.to_string());
        ReportResponse {
            error,
            highest_profit_item: result.highest_profit.as_ref().map(ProfitItem::from),
            most_popular_items: result.top_popular.iter().map(PopularItem::from).collect(),
        }
    }
}

impl From<&TradingItem> for ProfitItem {
    fn from(item: &TradingItem) -> Self {
        ProfitItem {
            name: item.name().to_string(),
            profit: item.profit(),
        }
    }
}

impl From<&TradingItem> for PopularItem {
    fn from(item: &TradingItem) -> Self {
        PopularItem {
            name: item.name().to_string(),
            quantity: item.quantity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Report(ReportResponse),
    Failure(FailureResponse),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub status: u16,
    pub body: ResponseBody,
}

impl UploadOutcome {
    fn failure(err: &ReportError) -> Self {
        let (status, error) = match err {
            ReportError::Decode(_) => (400, "Invalid file encoding"),
            ReportError::NotText(_) | ReportError::Extract(_) => {
                (500, "Failed to read the uploaded document")
            }
        };
        UploadOutcome {
            status,
            body: ResponseBody::Failure(FailureResponse {
                error: error.to_string(),
                details: Some(err.to_string()),
            }),
        }
    }
}

/// Standard base64, optionally behind a `data:<mime>;base64,` prefix.
/// Line breaks and other ASCII whitespace inside the payload are ignored.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, ReportError> {
    let payload = payload.trim();
    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, data)| data),
        None => payload,
    };
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(PAYLOAD_ENGINE.decode(compact)?)
}

pub fn handle_upload(payload: &str, extractor: &dyn TextExtractor, top_n: usize) -> UploadOutcome {
    let text = match decode_payload(payload).and_then(|doc| extractor.extract_text(&doc)) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "upload rejected");
            return UploadOutcome::failure(&e);
        }
    };

    let result = parser::parse_report(&text, top_n);
    debug!(items = result.items.len(), "parsed upload");

    UploadOutcome {
        status: 200,
        body: ResponseBody::Report(ReportResponse::from_result(&result)),
    }
}

// ── Tests ──
