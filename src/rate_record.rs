use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{currency_pairs::CurrencyPairs, error::ForexError, forex_api::ForexPayload};

/// Rates are kept in the order the currencies table lists them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateRecord {
    pub base: String,
    pub rates: IndexMap<String, Decimal>,
    pub last_update: NaiveDate,
}

impl RateRecord {
    /// Keeps only the rates listed in `pairs`. Every listed code must be present
    /// and numeric; the rest of the payload is not looked at.
    pub fn select(pairs: &CurrencyPairs, payload: &ForexPayload) -> Result<Self, ForexError> {
        let mut rates = IndexMap::new();

        for pair in &pairs.with_pairs {
            let value = payload
                .rates
                .get(pair)
                .ok_or_else(|| ForexError::MissingRate {
                    base: pairs.base.clone(),
                    pair: pair.clone(),
                })?;
            let rate = <Decimal as Deserialize>::deserialize(value).map_err(|_| ForexError::InvalidRate {
                base: pairs.base.clone(),
                pair: pair.clone(),
                value: value.to_string(),
            })?;
            rates.insert(pair.clone(), rate);
        }

        Ok(Self {
            base: pairs.base.clone(),
            rates,
            last_update: payload.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn usd_payload() -> ForexPayload {
        serde_json::from_value(json!({
            "date": "2021-07-01",
            "rates": {"EUR": 0.8, "GBP": 0.7, "JPY": 110, "XAU": null},
        }))
        .unwrap()
    }

    fn pairs(base: &str, with: &[&str]) -> CurrencyPairs {
        CurrencyPairs {
            base: base.to_string(),
            with_pairs: with.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn drops_unrequested_rates() {
        let record = RateRecord::select(&pairs("USD", &["EUR", "GBP"]), &usd_payload()).unwrap();

        assert_eq!(record.base, "USD");
        assert_eq!(record.last_update, NaiveDate::from_ymd_opt(2021, 7, 1).unwrap());
        assert_eq!(
            record.rates,
            IndexMap::from([
                ("EUR".to_string(), Decimal::new(8, 1)),
                ("GBP".to_string(), Decimal::new(7, 1)),
            ])
        );
    }

    #[test]
    fn keeps_table_order() {
        let record =
            RateRecord::select(&pairs("USD", &["JPY", "EUR", "GBP"]), &usd_payload()).unwrap();

        let codes: Vec<&str> = record.rates.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["JPY", "EUR", "GBP"]);
        assert!(
            serde_json::to_string(&record)
                .unwrap()
                .contains(r#""rates":{"JPY":110,"EUR":0.8,"GBP":0.7}"#)
        );
    }

    #[test]
    fn missing_rate_is_an_error() {
        let err = RateRecord::select(&pairs("USD", &["EUR", "NZD"]), &usd_payload()).unwrap_err();

        assert_eq!(
            err,
            ForexError::MissingRate {
                base: "USD".to_string(),
                pair: "NZD".to_string(),
            }
        );
    }

    #[test]
    fn non_numeric_requested_rate_is_an_error() {
        let err = RateRecord::select(&pairs("USD", &["XAU"]), &usd_payload()).unwrap_err();

        assert_eq!(
            err,
            ForexError::InvalidRate {
                base: "USD".to_string(),
                pair: "XAU".to_string(),
                value: "null".to_string(),
            }
        );
    }

    #[test]
    fn unrequested_rates_are_not_parsed() {
        let payload = ForexPayload {
            date: NaiveDate::from_ymd_opt(2021, 7, 1).unwrap(),
            rates: HashMap::from([
                ("EUR".to_string(), json!(0.8)),
                ("BIG".to_string(), serde_json::from_str("1e40").unwrap()),
            ]),
        };

        let record = RateRecord::select(&pairs("USD", &["EUR"]), &payload).unwrap();

        assert_eq!(record.rates.len(), 1);
    }

    #[test]
    fn serializes_as_flat_json() {
        let record = RateRecord::select(&pairs("USD", &["EUR", "GBP"]), &usd_payload()).unwrap();

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "base": "USD",
                "rates": {"EUR": 0.8, "GBP": 0.7},
                "last_update": "2021-07-01",
            })
        );
    }

    #[test]
    fn integer_rates_stay_integers() {
        let record = RateRecord::select(&pairs("USD", &["JPY"]), &usd_payload()).unwrap();

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"base":"USD","rates":{"JPY":110},"last_update":"2021-07-01"}"#
        );
    }
}
