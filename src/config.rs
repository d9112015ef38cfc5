use std::{collections::BTreeMap, env, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, Result};

use crate::error::ForexError;

pub const DEFAULT_BASE_URL: &str =
    "https://gist.githubusercontent.com/dartion/4c96ec6349aa747f2b8fce09ff9c4d83/raw/";
pub const DEFAULT_API_CHECK_URL: &str =
    "https://gist.github.com/dartion/4c96ec6349aa747f2b8fce09ff9c4d83";
pub const DEFAULT_CURRENCIES_PATH: &str = "/opt/airflow/dags/files/forex_currencies.csv";
pub const DEFAULT_RATES_PATH: &str = "/opt/airflow/dags/files/forex_rates.json";

const DEFAULT_ENDPOINTS: &[(&str, &str)] = &[
    ("USD", "api_forex_exchange_usd.json"),
    ("EUR", "api_forex_exchange_eur.json"),
];

/// Fixed mapping from base currency to the remote resource holding its rates.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base_url: String,
    files: BTreeMap<String, String>,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>, files: BTreeMap<String, String>) -> Self {
        Self {
            base_url: base_url.into(),
            files,
        }
    }

    /// Parses `USD=usd.json,EUR=eur.json`.
    pub fn parse(base_url: impl Into<String>, spec: &str) -> Result<Self> {
        let mut files = BTreeMap::new();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (base, file) = entry
                .split_once('=')
                .map(|(b, f)| (b.trim(), f.trim()))
                .filter(|(b, f)| !b.is_empty() && !f.is_empty())
                .ok_or_else(|| ForexError::InvalidEndpoint(entry.to_string()))?;
            files.insert(base.to_string(), file.to_string());
        }

        Ok(Self::new(base_url, files))
    }

    pub fn url_for(&self, base: &str) -> Result<String, ForexError> {
        let file = self
            .files
            .get(base)
            .ok_or_else(|| ForexError::UnknownBase(base.to_string()))?;

        Ok(format!("{}{}", self.base_url, file))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        let files = DEFAULT_ENDPOINTS
            .iter()
            .map(|(base, file)| (base.to_string(), file.to_string()))
            .collect();
        Self::new(DEFAULT_BASE_URL, files)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PokeSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PokeSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoints: Endpoints,
    pub api_check_url: String,
    pub currencies_path: PathBuf,
    pub rates_path: PathBuf,
    pub poke: PokeSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("FOREX_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoints = match lookup("FOREX_ENDPOINTS") {
            Some(spec) => Endpoints::parse(base_url, &spec).context("FOREX_ENDPOINTS")?,
            None => Endpoints {
                base_url,
                ..Endpoints::default()
            },
        };

        let defaults = PokeSettings::default();
        let poke = PokeSettings {
            interval: secs(&lookup, "FOREX_POKE_INTERVAL_SECS")?.unwrap_or(defaults.interval),
            timeout: secs(&lookup, "FOREX_POKE_TIMEOUT_SECS")?.unwrap_or(defaults.timeout),
        };

        Ok(Self {
            endpoints,
            api_check_url: lookup("FOREX_API_CHECK_URL")
                .unwrap_or_else(|| DEFAULT_API_CHECK_URL.to_string()),
            currencies_path: lookup("FOREX_CURRENCIES_PATH")
                .unwrap_or_else(|| DEFAULT_CURRENCIES_PATH.to_string())
                .into(),
            rates_path: lookup("FOREX_RATES_PATH")
                .unwrap_or_else(|| DEFAULT_RATES_PATH.to_string())
                .into(),
            poke,
        })
    }
}

fn secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    lookup(key)
        .map(|value| {
            u64::from_str(value.trim())
                .map(Duration::from_secs)
                .with_context(|| format!("{key} must be a whole number of seconds, got {value:?}"))
        })
        .transpose()
}
