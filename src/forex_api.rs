use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ForexError;

/// Body served for one base currency. Fields other than these are ignored.
/// Rates stay raw until a record picks the ones it needs.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ForexPayload {
    pub date: NaiveDate,
    pub rates: HashMap<String, Value>,
}

#[allow(async_fn_in_trait)]
pub trait RatesSource {
    async fn fetch(&self, url: &str) -> Result<ForexPayload>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpRatesSource {
    client: Client,
}

impl HttpRatesSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl RatesSource for HttpRatesSource {
    async fn fetch(&self, url: &str) -> Result<ForexPayload> {
        let text = load_text(&self.client, url).await?;
        let payload: ForexPayload = serde_json::from_str(&text)?;

        Ok(payload)
    }
}

pub async fn load_text(client: &Client, url: &str) -> Result<String> {
    debug!("GET {}", url);
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(ForexError::BadStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        }
        .into());
    }

    let text = resp.text().await?;

    Ok(text)
}
