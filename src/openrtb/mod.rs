pub mod request;
pub mod response;

pub use request::{Banner, BidRequest, Format, Imp, Native, Video};
pub use response::{Bid, BidResponse, SeatBid};
