use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use reqwest::Client;

use forex_pipeline::{
    Config, HttpRatesSource, download_rates,
    schema::FOREX_RATES_TABLE_DDL,
    sensor::{wait_for_api, wait_for_file},
};

#[derive(Parser)]
#[command(name = "forex_pipeline")]
#[command(about = "Fetch foreign-exchange rates into newline-delimited JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Currencies table (overrides FOREX_CURRENCIES_PATH)
    #[arg(long, global = true)]
    currencies: Option<PathBuf>,

    /// Output file (overrides FOREX_RATES_PATH)
    #[arg(long, global = true)]
    rates: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download rates and append them to the output file
    Fetch,

    /// Wait until the rates API answers with rates
    WaitApi,

    /// Wait until the currencies table exists
    WaitFile,

    /// Print the table definition for the output file
    Schema,

    /// wait-api, wait-file, then fetch
    Run,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = cli.currencies {
        config.currencies_path = path;
    }
    if let Some(path) = cli.rates {
        config.rates_path = path;
    }

    let client = Client::new();

    match cli.command {
        Commands::Fetch => fetch(&client, &config).await?,
        Commands::WaitApi => wait_for_api(&client, &config.api_check_url, &config.poke).await?,
        Commands::WaitFile => wait_for_file(&config.currencies_path, &config.poke).await?,
        Commands::Schema => print!("{}", FOREX_RATES_TABLE_DDL),
        Commands::Run => {
            wait_for_api(&client, &config.api_check_url, &config.poke).await?;
            wait_for_file(&config.currencies_path, &config.poke).await?;
            fetch(&client, &config).await?;
        }
    }

    Ok(())
}

async fn fetch(client: &Client, config: &Config) -> Result<()> {
    let source = HttpRatesSource::new(client.clone());
    let rows = download_rates(
        &source,
        &config.endpoints,
        &config.currencies_path,
        &config.rates_path,
    )
    .await?;
    info!(
        "Appended {} records to {}",
        rows,
        config.rates_path.display()
    );

    Ok(())
}
