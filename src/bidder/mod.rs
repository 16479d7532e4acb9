pub mod error;
pub mod params;
pub mod tpmn;
pub mod types;

pub use error::BidderError;
pub use tpmn::TpmnAdapter;
