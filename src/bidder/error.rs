/// Errors an adapter call reports back to the orchestrator.
///
/// `BadInput` is scoped to one offending impression and never aborts its
/// siblings. `BadServerResponse` is call-fatal when the wire body cannot be
/// decoded, bid-scoped otherwise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BidderError {
    #[error("{0}")]
    BadInput(String),

    #[error("{0}")]
    BadServerResponse(String),
}

impl BidderError {
    pub fn bad_input(message: impl Into<String>) -> Self {
        BidderError::BadInput(message.into())
    }

    pub fn bad_server_response(message: impl Into<String>) -> Self {
        BidderError::BadServerResponse(message.into())
    }
}
