pub mod client;
pub mod ratio;
pub mod types;

pub use ratio::{RatioHealth, RatioSummary};
