//! Domain types for Ratewatch

pub mod date_key;
pub mod rate;

pub use date_key::{DateKey, DateKeyError};
pub use rate::{RatePoint, RateSeries, SeriesError};
