use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Exchange bid response. Seat and bid entries are kept optional so that
/// null entries in the wire body deserialize instead of failing the whole
/// response; the interpreter drops them silently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seatbid: Option<Vec<Option<SeatBid>>>,
    /// Currency the exchange claims to have priced bids in. Informational
    /// only; TPMN settles in USD regardless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cur: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeatBid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<Vec<Option<Bid>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(default)]
    pub id: String,
    /// Identifier of the impression this bid answers.
    #[serde(default)]
    pub impid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}
