mod loader;

pub use loader::{RateRecord, RatesLoader, RatesLoaderError};
