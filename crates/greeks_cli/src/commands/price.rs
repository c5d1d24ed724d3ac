//! Price command implementation
//!
//! Prices the configured market point for Call, Put or both and prints the
//! result as a console table, JSON or CSV.

use serde::Serialize;
use tracing::info;

use greeks_models::analytical::{evaluate, MarketParams, OptionType, PricingResult};

use crate::config::{CliConfig, OutputFormat};
use crate::display::{format_table, DisplayGreeks};
use crate::{CliError, Result};

/// Option sides selected by `--option`: `call`, `put` or `both`.
pub fn parse_sides(option: &str) -> Result<Vec<OptionType>> {
    if option.trim().eq_ignore_ascii_case("both") {
        return Ok(OptionType::ALL.to_vec());
    }
    Ok(vec![option.parse::<OptionType>()?])
}

#[derive(Serialize)]
struct PricedOption<'a> {
    option_type: OptionType,
    #[serde(flatten)]
    result: &'a PricingResult,
}

#[derive(Serialize)]
struct PriceDocument<'a> {
    market: &'a MarketParams,
    results: Vec<PricedOption<'a>>,
}

/// Renders priced sides in the requested format.
pub fn render(
    params: &MarketParams,
    results: &[(OptionType, PricingResult)],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<(OptionType, DisplayGreeks)> = results
                .iter()
                .map(|(option_type, result)| (*option_type, DisplayGreeks::from(result)))
                .collect();
            Ok(format_table(&rows))
        }
        OutputFormat::Json => {
            let document = PriceDocument {
                market: params,
                results: results
                    .iter()
                    .map(|(option_type, result)| PricedOption {
                        option_type: *option_type,
                        result,
                    })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&document)?)
        }
        OutputFormat::Csv => {
            let mut csv = csv::Writer::from_writer(Vec::new());
            csv.write_record([
                "option_type", "d1", "d2", "price", "delta", "gamma", "vega", "theta", "rho",
            ])?;
            for (option_type, r) in results {
                let mut record = vec![option_type.as_str().to_string()];
                record.extend(
                    [r.d1, r.d2, r.price, r.delta, r.gamma, r.vega, r.theta, r.rho]
                        .iter()
                        .map(f64::to_string),
                );
                csv.write_record(&record)?;
            }
            let bytes = csv
                .into_inner()
                .map_err(|e| CliError::Io(e.into_error()))?;
            String::from_utf8(bytes).map_err(|e| CliError::InvalidArgument(e.to_string()))
        }
    }
}

/// Run the price command
pub fn run(config: &CliConfig, option: &str) -> Result<()> {
    let sides = parse_sides(option)?;
    let params = config.market.params();
    params.validate()?;

    info!(
        spot = params.spot,
        strike = params.strike,
        rate = params.rate,
        expiry = params.expiry,
        volatility = params.volatility,
        "Pricing market point"
    );

    let results: Vec<(OptionType, PricingResult)> = sides
        .into_iter()
        .map(|option_type| (option_type, evaluate(&params, option_type)))
        .collect();

    println!("{}", render(&params, &results, config.output_format)?);
    Ok(())
}
