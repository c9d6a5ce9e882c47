//! Module `pricing::storage`.
//!
//! Direct helpers for valuing gas storage contracts from plain inputs: ISO date
//! strings and float rates, volumes and costs. They validate at the boundary,
//! build a [`StorageContract`], and run it through [`StorageEngine`].
//!
//! When to use: quick one-off valuations and scripts; prefer
//! [`StorageContract`] plus [`StorageEngine`] composition when the same oracle
//! values many contracts or the per-event breakdown is needed.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{ContractValuation, EventOrdering, PricingEngine, PricingError};
use crate::engines::StorageEngine;
use crate::instruments::{StorageContract, decimal_param, parse_iso_dates};
use crate::market::{PriceOracle, PriceSource, load_price_history};
use crate::models::LinearTrendForecast;

/// Net value of a storage contract priced by `oracle`.
///
/// Parameters:
/// - `injection_dates`, `withdrawal_dates`: ISO `YYYY-MM-DD` strings, processed
///   leg by leg (all injections, then all withdrawals).
/// - `injection_rate`, `withdrawal_rate`: volume moved on each date.
/// - `max_volume`: storage capacity.
/// - `storage_cost_per_unit`: charge per unit left in storage at the end.
///
/// Edge cases:
/// - Negative or non-finite numbers and malformed dates fail with
///   [`PricingError::InvalidParameter`] before anything is simulated.
/// - A date the oracle cannot price fails with [`PricingError::PriceUnavailable`].
///
/// # Examples
/// ```rust
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use gasferric::market::PriceSource;
/// use gasferric::pricing::price_gas_contract;
///
/// let value = price_gas_contract(
///     &["2023-06-30", "2023-07-31"],
///     &["2023-08-31", "2023-09-30"],
///     100.0,
///     100.0,
///     500.0,
///     2.0,
///     &PriceSource::Flat(dec!(2.0)),
/// )
/// .unwrap();
/// assert_eq!(value, Decimal::ZERO);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn price_gas_contract<S: AsRef<str>>(
    injection_dates: &[S],
    withdrawal_dates: &[S],
    injection_rate: f64,
    withdrawal_rate: f64,
    max_volume: f64,
    storage_cost_per_unit: f64,
    oracle: &dyn PriceOracle,
) -> Result<Decimal, PricingError> {
    let contract = contract_from_inputs(
        injection_dates,
        withdrawal_dates,
        injection_rate,
        withdrawal_rate,
        max_volume,
        storage_cost_per_unit,
    )?;
    Ok(value_storage_contract(&contract, oracle)?.net_value)
}

/// [`price_gas_contract`] with exact-date prices from a historical CSV file.
#[allow(clippy::too_many_arguments)]
pub fn price_gas_contract_from_file<S: AsRef<str>, P: AsRef<Path>>(
    price_file: P,
    injection_dates: &[S],
    withdrawal_dates: &[S],
    injection_rate: f64,
    withdrawal_rate: f64,
    max_volume: f64,
    storage_cost_per_unit: f64,
) -> Result<Decimal, PricingError> {
    let contract = contract_from_inputs(
        injection_dates,
        withdrawal_dates,
        injection_rate,
        withdrawal_rate,
        max_volume,
        storage_cost_per_unit,
    )?;
    let oracle = PriceSource::Lookup(load_price_history(price_file)?);
    Ok(value_storage_contract(&contract, &oracle)?.net_value)
}

/// [`price_gas_contract`] with prices from a linear trend fitted to a CSV file.
#[allow(clippy::too_many_arguments)]
pub fn price_gas_contract_with_forecast<S: AsRef<str>, P: AsRef<Path>>(
    price_file: P,
    injection_dates: &[S],
    withdrawal_dates: &[S],
    injection_rate: f64,
    withdrawal_rate: f64,
    max_volume: f64,
    storage_cost_per_unit: f64,
) -> Result<Decimal, PricingError> {
    let contract = contract_from_inputs(
        injection_dates,
        withdrawal_dates,
        injection_rate,
        withdrawal_rate,
        max_volume,
        storage_cost_per_unit,
    )?;
    let history = load_price_history(price_file)?;
    let oracle = PriceSource::Forecast(LinearTrendForecast::fit(&history)?);
    Ok(value_storage_contract(&contract, &oracle)?.net_value)
}

/// Full valuation with cost, revenue and per-event breakdown.
pub fn value_storage_contract(
    contract: &StorageContract,
    oracle: &dyn PriceOracle,
) -> Result<ContractValuation, PricingError> {
    debug!(
        injections = contract.injection_dates.len(),
        withdrawals = contract.withdrawal_dates.len(),
        ordering = ?contract.ordering,
        "valuing storage contract"
    );
    StorageEngine::new().price(contract, oracle)
}

/// Console line reporting a contract value.
pub fn format_contract_value(value: Decimal) -> String {
    format!("The value of the gas contract is: {value}")
}

fn contract_from_inputs<S: AsRef<str>>(
    injection_dates: &[S],
    withdrawal_dates: &[S],
    injection_rate: f64,
    withdrawal_rate: f64,
    max_volume: f64,
    storage_cost_per_unit: f64,
) -> Result<StorageContract, PricingError> {
    StorageContract::builder()
        .injection_dates(parse_iso_dates(injection_dates)?)
        .withdrawal_dates(parse_iso_dates(withdrawal_dates)?)
        .injection_rate(decimal_param("injection_rate", injection_rate)?)
        .withdrawal_rate(decimal_param("withdrawal_rate", withdrawal_rate)?)
        .max_volume(decimal_param("max_volume", max_volume)?)
        .storage_cost_per_unit(decimal_param("storage_cost_per_unit", storage_cost_per_unit)?)
        .ordering(EventOrdering::LegSequential)
        .build()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn report_line_keeps_full_precision() {
        assert_eq!(
            format_contract_value(dec!(-12.3450)),
            "The value of the gas contract is: -12.3450"
        );
    }

    #[test]
    fn malformed_date_fails_before_pricing() {
        let err = price_gas_contract(
            &["2023/06/30"],
            &[],
            100.0,
            100.0,
            500.0,
            0.0,
            &PriceSource::Flat(dec!(1)),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter(msg) if msg.contains("2023/06/30")));
    }

    #[test]
    fn negative_capacity_is_invalid() {
        let err = price_gas_contract(
            &["2023-06-30"],
            &["2023-08-31"],
            100.0,
            100.0,
            -1.0,
            0.0,
            &PriceSource::Flat(dec!(1)),
        )
        .unwrap_err();
        assert_eq!(err, PricingError::invalid("storage max_volume must be >= 0"));
    }
}
