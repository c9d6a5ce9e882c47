//! Command-line entry point for gas storage contract valuation.
//!
//! Usage:
//!   gas_contract --prices Nat_Gas.csv --oracle forecast \
//!       --inject 2023-06-30 --inject 2023-07-31 \
//!       --withdraw 2023-08-31 --withdraw 2023-09-30 \
//!       --injection-rate 100 --withdrawal-rate 100 --max-volume 500 --storage-cost 2
//!
//!   gas_contract --config contract.json

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use gasferric::core::{
    EventOrdering, PriceSourceConfig, StorageContractTerms, ValuationConfig, from_json,
    to_json_pretty,
};
use gasferric::instruments::StorageContract;
use gasferric::market::PriceSource;
use gasferric::pricing::{format_contract_value, value_storage_contract};
use rust_decimal::Decimal;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OracleKind {
    /// Exact-date lookup in the price file.
    Lookup,
    /// Linear trend fitted to the price file.
    Forecast,
}

#[derive(Parser, Debug)]
#[command(name = "gas_contract")]
#[command(about = "Value a natural-gas storage contract")]
struct Args {
    /// JSON file holding `contract` terms and `price_source`
    #[arg(long, conflicts_with_all = ["contract", "prices", "flat_price"])]
    config: Option<PathBuf>,

    /// JSON file holding contract terms only
    #[arg(long)]
    contract: Option<PathBuf>,

    /// Historical price CSV (`Dates`, `Prices` columns)
    #[arg(long)]
    prices: Option<PathBuf>,

    /// How the price file is turned into prices
    #[arg(long, value_enum, default_value = "lookup")]
    oracle: OracleKind,

    /// Use the same price on every date instead of a price file
    #[arg(long, conflicts_with = "prices")]
    flat_price: Option<Decimal>,

    /// Injection date (YYYY-MM-DD), repeatable
    #[arg(long = "inject")]
    injection_dates: Vec<String>,

    /// Withdrawal date (YYYY-MM-DD), repeatable
    #[arg(long = "withdraw")]
    withdrawal_dates: Vec<String>,

    #[arg(long)]
    injection_rate: Option<Decimal>,

    #[arg(long)]
    withdrawal_rate: Option<Decimal>,

    #[arg(long)]
    max_volume: Option<Decimal>,

    #[arg(long, default_value = "0")]
    storage_cost: Decimal,

    /// Event ordering: `leg` or `chronological`
    #[arg(long)]
    ordering: Option<EventOrdering>,

    /// Print the per-event breakdown
    #[arg(long)]
    breakdown: bool,

    /// Also print the trend forecast for this many month-ends (forecast oracle only)
    #[arg(long, default_value = "0")]
    forecast_months: usize,

    /// Print the valuation as JSON instead of the report line
    #[arg(long)]
    json: bool,
}

fn contract_terms(args: &Args) -> Result<StorageContractTerms> {
    if let Some(path) = &args.contract {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("reading contract file {}", path.display()))?;
        let mut terms: StorageContractTerms = from_json(&payload)
            .with_context(|| format!("parsing contract file {}", path.display()))?;
        if let Some(ordering) = args.ordering {
            terms.ordering = ordering;
        }
        return Ok(terms);
    }

    let required = |value: Option<Decimal>, flag: &str| {
        value.ok_or_else(|| anyhow!("--{flag} is required without --contract"))
    };
    Ok(StorageContractTerms {
        injection_dates: args.injection_dates.clone(),
        withdrawal_dates: args.withdrawal_dates.clone(),
        injection_rate: required(args.injection_rate, "injection-rate")?,
        withdrawal_rate: required(args.withdrawal_rate, "withdrawal-rate")?,
        max_volume: required(args.max_volume, "max-volume")?,
        storage_cost_per_unit: args.storage_cost,
        ordering: args.ordering.unwrap_or_default(),
    })
}

fn price_source_config(args: &Args) -> Result<PriceSourceConfig> {
    if let Some(price) = args.flat_price {
        return Ok(PriceSourceConfig::Flat { price });
    }
    let Some(path) = args.prices.clone() else {
        bail!("either --prices or --flat-price is required");
    };
    Ok(match args.oracle {
        OracleKind::Lookup => PriceSourceConfig::Lookup { path },
        OracleKind::Forecast => PriceSourceConfig::Forecast { path },
    })
}

fn load_config(args: &Args) -> Result<ValuationConfig> {
    if let Some(path) = &args.config {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: ValuationConfig = from_json(&payload)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        if let Some(ordering) = args.ordering {
            config.contract.ordering = ordering;
        }
        return Ok(config);
    }
    Ok(ValuationConfig {
        contract: contract_terms(args)?,
        price_source: price_source_config(args)?,
    })
}

fn print_forecast(oracle: &PriceSource, months: usize) -> Result<()> {
    let PriceSource::Forecast(model) = oracle else {
        bail!("--forecast-months needs the forecast oracle");
    };
    println!(
        "Trend fitted on {} observations from {}: {:.6} + {:.6} per day",
        model.observations(),
        model.origin(),
        model.intercept(),
        model.slope_per_day()
    );
    for (date, price) in model.project_month_ends(months) {
        println!("  {date}  {price:.4}");
    }
    Ok(())
}

/// Log filter from `RUST_LOG`-style directives, `info` when none are given.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let contract = StorageContract::from_terms(&config.contract)?;
    let oracle = PriceSource::from_config(&config.price_source)?;
    info!(
        oracle = oracle.kind(),
        injections = contract.injection_dates.len(),
        withdrawals = contract.withdrawal_dates.len(),
        "valuing contract"
    );

    if args.forecast_months > 0 {
        print_forecast(&oracle, args.forecast_months)?;
    }

    let valuation = value_storage_contract(&contract, &oracle)?;

    if args.json {
        println!("{}", to_json_pretty(&valuation)?);
        return Ok(());
    }

    if args.breakdown {
        for event in &valuation.events {
            println!(
                "{}  {:<8}  requested {:>10}  actual {:>10}  price {:>10}  cash {:>12}  level {:>10}",
                event.date,
                event.kind,
                event.requested_volume,
                event.actual_volume,
                event.price,
                event.cash_flow,
                event.level_after
            );
        }
        println!(
            "revenue {}  cost {}  (storage charge {} on final level {})",
            valuation.total_revenue,
            valuation.total_cost,
            valuation.storage_charge,
            valuation.final_level
        );
    }
    println!("{}", format_contract_value(valuation.net_value));
    Ok(())
}
