use crate::bidder::error::BidderError;
use crate::openrtb::request::BidRequest;
use crate::openrtb::response::Bid;

/// A price with an optional ISO-4217 currency, as used for bid floors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Price {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

impl Price {
    pub fn new(amount: Option<f64>, currency: Option<String>) -> Self {
        Self { amount, currency }
    }

    /// A usable price carries an amount strictly greater than zero.
    pub fn is_valid(&self) -> bool {
        self.amount.map_or(false, |amount| amount > 0.0)
    }

    /// Whether this price must go through currency conversion before it can
    /// be sent to an exchange settling in `settlement`.
    pub fn needs_conversion(&self, settlement: &str) -> bool {
        self.is_valid()
            && self
                .currency
                .as_deref()
                .map_or(false, |cur| !cur.is_empty() && !cur.eq_ignore_ascii_case(settlement))
    }
}

/// Media type a winning bid is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Banner,
    Video,
    Native,
}

/// The one outgoing wire request produced for an auction round.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub endpoint: String,
    pub body: BidRequest,
}

/// Result of the request-build phase: zero or one outgoing request, plus
/// impression-scoped errors for whatever did not survive.
#[derive(Debug, Default)]
pub struct RequestBuild {
    pub outgoing: Option<OutgoingRequest>,
    pub errors: Vec<BidderError>,
}

/// An exchange bid classified back to a media type and settlement currency.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBid {
    pub bid: Bid,
    pub media_type: MediaType,
    pub currency: String,
}

/// Result of the response-interpretation phase.
#[derive(Debug, Default)]
pub struct BidExtraction {
    pub bids: Vec<NormalizedBid>,
    pub errors: Vec<BidderError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_validity_requires_positive_amount() {
        assert!(Price::new(Some(0.5), None).is_valid());
        assert!(!Price::new(Some(0.0), None).is_valid());
        assert!(!Price::new(Some(-1.0), None).is_valid());
        assert!(!Price::new(None, Some("USD".to_string())).is_valid());
    }

    #[test]
    fn conversion_skipped_for_settlement_or_missing_currency() {
        let usd = Price::new(Some(1.0), Some("USD".to_string()));
        assert!(!usd.needs_conversion("USD"));

        let lowercase = Price::new(Some(1.0), Some("usd".to_string()));
        assert!(!lowercase.needs_conversion("USD"));

        let blank = Price::new(Some(1.0), Some(String::new()));
        assert!(!blank.needs_conversion("USD"));

        let absent = Price::new(Some(1.0), None);
        assert!(!absent.needs_conversion("USD"));
    }

    #[test]
    fn conversion_required_for_foreign_currency() {
        let eur = Price::new(Some(1.0), Some("EUR".to_string()));
        assert!(eur.needs_conversion("USD"));

        // Non-positive floors are passed through rather than converted.
        let zero_eur = Price::new(Some(0.0), Some("EUR".to_string()));
        assert!(!zero_eur.needs_conversion("USD"));
    }
}
