use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Row {
    base: String,
    with_pairs: String,
}

/// One line of the currencies table: a base currency and the codes to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyPairs {
    pub base: String,
    pub with_pairs: Vec<String>,
}

impl From<Row> for CurrencyPairs {
    fn from(row: Row) -> Self {
        Self {
            base: row.base.trim().to_string(),
            with_pairs: row.with_pairs.split_whitespace().map(str::to_string).collect(),
        }
    }
}

pub fn load_currency_pairs(path: &Path) -> Result<Vec<CurrencyPairs>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Can't open currencies file {}", path.display()))?;
    read_currency_pairs(file).with_context(|| format!("Can't parse {}", path.display()))
}

pub fn read_currency_pairs(reader: impl Read) -> Result<Vec<CurrencyPairs>> {
    let mut reader = csv::ReaderBuilder::new().delimiter(b';').from_reader(reader);

    let mut pairs = Vec::new();
    for row in reader.deserialize::<Row>() {
        pairs.push(row?.into());
    }

    Ok(pairs)
}
