pub mod calculations;
pub mod models;

pub use calculations::{EarningsCalculator, compute_earnings};
pub use models::*;
