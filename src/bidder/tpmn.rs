use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::bidder::error::BidderError;
use crate::bidder::params::{parse_imp_params, ImpParams};
use crate::bidder::types::{
    BidExtraction, MediaType, NormalizedBid, OutgoingRequest, Price, RequestBuild,
};
use crate::config::AdapterConfig;
use crate::currency::{ConversionError, CurrencyConverter};
use crate::openrtb::request::{Banner, BidRequest, Imp, Native};
use crate::openrtb::response::{Bid, BidResponse};

/// Currency TPMN settles every bid in, regardless of what the response
/// declares.
pub const BIDDER_CURRENCY: &str = "USD";

/// Stateless adapter for the TPMN exchange. Configured once with the
/// destination endpoint and a currency-conversion collaborator; safe to share
/// across concurrent auctions.
pub struct TpmnAdapter {
    endpoint: String,
    converter: Arc<dyn CurrencyConverter>,
}

impl TpmnAdapter {
    pub fn new(endpoint: String, converter: Arc<dyn CurrencyConverter>) -> Self {
        Self { endpoint, converter }
    }

    pub fn from_config(config: &AdapterConfig, converter: Arc<dyn CurrencyConverter>) -> Self {
        Self::new(config.tpmn.endpoint.clone(), converter)
    }

    /// Translate one auction request into the exchange's wire shape.
    ///
    /// Impressions are processed in order; a malformed impression yields a
    /// `BadInput` error and never aborts its siblings. The whole batch goes
    /// out as a single request. A floor price that cannot be converted to the
    /// settlement currency aborts the call, discarding any work done so far.
    pub fn build_request(&self, request: &BidRequest) -> Result<RequestBuild, ConversionError> {
        let mut valid_imps = Vec::with_capacity(request.imp.len());
        let mut errors = Vec::new();

        for imp in &request.imp {
            let params = match parse_imp_params(imp) {
                Ok(params) => params,
                Err(err) => {
                    errors.push(err);
                    continue;
                }
            };

            let floor = self.resolve_bid_floor(imp, request)?;

            match modify_imp(imp, &params, floor) {
                Ok(Some(updated)) => valid_imps.push(updated),
                Ok(None) => {
                    debug!(imp_id = %imp.id, "impression carries no banner/video/native, skipping")
                }
                Err(err) => errors.push(err),
            }
        }

        let outgoing = if valid_imps.is_empty() {
            None
        } else {
            let mut body = request.clone();
            body.imp = valid_imps;
            Some(OutgoingRequest { endpoint: self.endpoint.clone(), body })
        };

        Ok(RequestBuild { outgoing, errors })
    }

    /// Interpret one wire response body against the impressions of the
    /// original (untransformed) request.
    ///
    /// An undecodable body is fatal; every other problem is scoped to the
    /// offending bid. An absent response or empty seat list is a valid
    /// no-bid outcome.
    pub fn interpret_response(
        &self,
        imps: &[Imp],
        body: &[u8],
    ) -> Result<BidExtraction, BidderError> {
        let response: Option<BidResponse> = serde_json::from_slice(body)
            .map_err(|err| BidderError::bad_server_response(format!("Failed to decode: {err}")))?;

        Ok(extract_bids(imps, response))
    }

    fn resolve_bid_floor(&self, imp: &Imp, request: &BidRequest) -> Result<Price, ConversionError> {
        let floor = Price::new(imp.bidfloor, imp.bidfloorcur.clone());
        if !floor.needs_conversion(BIDDER_CURRENCY) {
            return Ok(floor);
        }

        let (amount, from) = match (floor.amount, floor.currency.as_deref()) {
            (Some(amount), Some(from)) => (amount, from),
            _ => return Ok(floor),
        };

        let converted = self.converter.convert(amount, request, from, BIDDER_CURRENCY)?;
        Ok(Price::new(Some(converted), Some(BIDDER_CURRENCY.to_string())))
    }
}

fn modify_imp(imp: &Imp, params: &ImpParams, floor: Price) -> Result<Option<Imp>, BidderError> {
    let mut updated = imp.clone();

    if let Some(banner) = &imp.banner {
        updated.banner = Some(modify_banner(banner)?);
        updated.video = None;
        updated.native = None;
    } else if imp.video.is_some() {
        updated.native = None;
    } else if let Some(native) = &imp.native {
        updated.native = Some(modify_native(native)?);
    } else {
        // Nothing the exchange can bid on.
        return Ok(None);
    }

    updated.tagid = Some(params.inventory_id.to_string());
    updated.bidfloor = floor.amount;
    updated.bidfloorcur = floor.currency;
    updated.ext =
        Some(serde_json::to_value(params).map_err(|err| BidderError::bad_input(err.to_string()))?);

    Ok(Some(updated))
}

fn modify_banner(banner: &Banner) -> Result<Banner, BidderError> {
    let missing = |side: Option<u32>| side.map_or(true, |px| px == 0);
    if !missing(banner.w) && !missing(banner.h) {
        return Ok(banner.clone());
    }

    let first = banner
        .format
        .first()
        .ok_or_else(|| BidderError::bad_input("Size information missing for banner"))?;

    let mut updated = banner.clone();
    updated.w = first.w;
    updated.h = first.h;
    Ok(updated)
}

fn modify_native(native: &Native) -> Result<Native, BidderError> {
    let payload: Value = serde_json::from_str(&native.request)
        .map_err(|err| BidderError::bad_input(err.to_string()))?;

    if payload.get("native").is_some() {
        return Ok(native.clone());
    }

    let mut updated = native.clone();
    updated.request = json!({ "native": payload }).to_string();
    Ok(updated)
}

fn extract_bids(imps: &[Imp], response: Option<BidResponse>) -> BidExtraction {
    let mut out = BidExtraction::default();

    let seatbids = match response.and_then(|r| r.seatbid) {
        Some(seatbids) if !seatbids.is_empty() => seatbids,
        _ => return out,
    };

    let bids = seatbids
        .into_iter()
        .flatten()
        .filter_map(|seat| seat.bid)
        .flatten()
        .flatten();

    for bid in bids {
        if !Price::new(bid.price, None).is_valid() {
            debug!(bid_id = %bid.id, "discarding bid with absent or non-positive price");
            continue;
        }

        match media_type_for(&bid, imps) {
            Some(media_type) => out.bids.push(NormalizedBid {
                bid,
                media_type,
                currency: BIDDER_CURRENCY.to_string(),
            }),
            None => out.errors.push(BidderError::bad_server_response(format!(
                "ignoring bid id={}, request doesn't contain any valid impression with id={}",
                bid.id, bid.impid
            ))),
        }
    }

    out
}

/// Classify a bid by the slot kind of the original impression it answers.
/// First id match wins; the request builder has already normalized each
/// outgoing impression to a single kind.
fn media_type_for(bid: &Bid, imps: &[Imp]) -> Option<MediaType> {
    let imp = imps.iter().find(|imp| imp.id == bid.impid)?;
    if imp.banner.is_some() {
        Some(MediaType::Banner)
    } else if imp.video.is_some() {
        Some(MediaType::Video)
    } else if imp.native.is_some() {
        Some(MediaType::Native)
    } else {
        None
    }
}
