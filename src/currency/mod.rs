use crate::openrtb::request::BidRequest;

/// External collaborator that converts a floor price between currencies.
///
/// The adapter treats the converter as authoritative: a conversion failure
/// aborts the whole request build, since a floor that cannot be expressed in
/// the settlement currency cannot be safely defaulted.
pub trait CurrencyConverter: Send + Sync {
    fn convert(
        &self,
        amount: f64,
        request: &BidRequest,
        from: &str,
        to: &str,
    ) -> Result<f64, ConversionError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Unable to convert from currency {from} to desired ad server currency {to}")]
    Unavailable { from: String, to: String },
}
