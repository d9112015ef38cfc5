pub mod config;
pub mod currency_pairs;
pub mod download;
pub mod error;
pub mod forex_api;
pub mod rate_record;
pub mod schema;
pub mod sensor;

pub use config::Config;
pub use download::download_rates;
pub use error::ForexError;
pub use forex_api::{ForexPayload, HttpRatesSource, RatesSource};
pub use rate_record::RateRecord;
