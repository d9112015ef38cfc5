/// External table the downstream step registers over the uploaded rates.
pub const FOREX_RATES_TABLE_DDL: &str = "\
CREATE EXTERNAL TABLE IF NOT EXISTS forex_rates(
    base STRING,
    last_update DATE,
    eur DOUBLE,
    usd DOUBLE,
    nzd DOUBLE,
    gbp DOUBLE,
    jpy DOUBLE,
    cad DOUBLE
    )
ROW FORMAT DELIMITED
FIELDS TERMINATED BY ','
STORED AS TEXTFILE
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_configured_currency() {
        for column in ["eur", "usd", "nzd", "gbp", "jpy", "cad"] {
            assert!(
                FOREX_RATES_TABLE_DDL.contains(&format!("{column} DOUBLE")),
                "missing {column}"
            );
        }
        assert!(FOREX_RATES_TABLE_DDL.contains("last_update DATE"));
    }
}
