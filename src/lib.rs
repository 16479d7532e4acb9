//! Adapter between a generic OpenRTB auction request and the TPMN ad
//! exchange: builds the exchange's wire request, interprets its bid
//! response back into orchestrator-facing bids.

pub mod bidder;
pub mod config;
pub mod currency;
pub mod openrtb;

pub use bidder::error::BidderError;
pub use bidder::tpmn::{TpmnAdapter, BIDDER_CURRENCY};
pub use bidder::types::{
    BidExtraction, MediaType, NormalizedBid, OutgoingRequest, Price, RequestBuild,
};
pub use config::AdapterConfig;
pub use currency::{ConversionError, CurrencyConverter};
