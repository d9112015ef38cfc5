use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ForexError {
    #[error("No endpoint configured for base currency {0}")]
    UnknownBase(String),

    #[error("Rate {pair} is missing from the {base} payload")]
    MissingRate { base: String, pair: String },

    #[error("Rate {pair} in the {base} payload is not a decimal number: {value}")]
    InvalidRate {
        base: String,
        pair: String,
        value: String,
    },

    #[error("Sensor {name} timed out after {timeout:?}")]
    SensorTimeout { name: String, timeout: Duration },

    #[error("Can't download {url}: {status}")]
    BadStatus { url: String, status: u16 },

    #[error("Invalid endpoint entry {0:?}, expected BASE=file")]
    InvalidEndpoint(String),
}
