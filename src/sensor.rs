use std::{future::Future, path::Path};

use anyhow::Result;
use log::{debug, info, warn};
use reqwest::Client;
use tokio::time::{Instant, sleep, timeout};

use crate::{config::PokeSettings, error::ForexError, forex_api::load_text};

/// Pokes `check` until it reports ready or more than `poke.timeout` has passed
/// since the first poke. Errors from `check` count as "not ready yet". A single
/// poke may run for the rest of the window, or one interval if less is left.
pub async fn wait_until<F, Fut>(name: &str, poke: &PokeSettings, mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let started = Instant::now();
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let budget = poke
            .timeout
            .saturating_sub(started.elapsed())
            .max(poke.interval);
        match timeout(budget, check()).await {
            Ok(Ok(true)) => {
                info!("Sensor {} ready after {} poke(s)", name, attempt);
                return Ok(());
            }
            Ok(Ok(false)) => debug!("Sensor {} not ready (poke {})", name, attempt),
            Ok(Err(err)) => warn!("Sensor {} poke {} failed: {:#}", name, attempt, err),
            Err(_) => warn!("Sensor {} poke {} got no answer within {:?}", name, attempt, budget),
        }

        // Fails only once the window is strictly exceeded, so a poke landing
        // exactly on the timeout still gets one more interval.
        if started.elapsed() > poke.timeout {
            return Err(ForexError::SensorTimeout {
                name: name.to_string(),
                timeout: poke.timeout,
            }
            .into());
        }
        sleep(poke.interval).await;
    }
}

pub async fn wait_for_api(client: &Client, url: &str, poke: &PokeSettings) -> Result<()> {
    wait_until("forex_api", poke, || async move {
        let body = load_text(client, url).await?;
        Ok::<_, anyhow::Error>(body.contains("rates"))
    })
    .await
}

pub async fn wait_for_file(path: &Path, poke: &PokeSettings) -> Result<()> {
    wait_until("forex_currencies_file", poke, || async move {
        Ok::<_, anyhow::Error>(tokio::fs::try_exists(path).await?)
    })
    .await
}
