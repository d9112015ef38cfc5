use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{
    config::Endpoints, currency_pairs::load_currency_pairs, forex_api::RatesSource,
    rate_record::RateRecord,
};

/// Fetches rates for every row of the currencies table and appends one JSON
/// line per row to `rates_path`. Stops at the first failing row; records
/// already written stay in the file.
pub async fn download_rates(
    source: &impl RatesSource,
    endpoints: &Endpoints,
    currencies_path: &Path,
    rates_path: &Path,
) -> Result<usize> {
    let rows = load_currency_pairs(currencies_path)?;
    info!(
        "Downloading rates for {} base currencies from {}",
        rows.len(),
        currencies_path.display()
    );

    for pairs in &rows {
        let url = endpoints.url_for(&pairs.base)?;
        let payload = source
            .fetch(&url)
            .await
            .with_context(|| format!("Can't fetch rates for {}", pairs.base))?;
        let record = RateRecord::select(pairs, &payload)?;

        append_record(rates_path, &record).await?;
        info!(
            "Wrote {} rates for {} as of {}",
            record.rates.len(),
            record.base,
            record.last_update
        );
    }

    Ok(rows.len())
}

pub async fn append_record(path: &Path, record: &RateRecord) -> Result<()> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Can't open {} for append", path.display()))?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;

    Ok(())
}
