pub mod posted_within;

pub use posted_within::{parse_date_posted, DatePostedWindow};
