pub mod match_request;
pub mod match_response;

pub use match_request::RankInput;
pub use match_response::RankedJobsResponse;
