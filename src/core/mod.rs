//! Core traits, common domain types, and library-wide result/error structures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::market::PriceOracle;

pub mod serialization;
pub mod types;

pub use serialization::*;
pub use types::*;

/// Common trait implemented by every priceable contract.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics and reports.
    fn instrument_type(&self) -> &str;
}

/// Valuation engine abstraction over an instrument type.
pub trait PricingEngine<I: Instrument> {
    /// Values an instrument against the provided price oracle.
    fn price(&self, instrument: &I, oracle: &dyn PriceOracle)
    -> Result<ContractValuation, PricingError>;
}

/// Cash and inventory effect of one simulated storage action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    /// Calendar date of the action.
    pub date: NaiveDate,
    /// Injection or withdrawal.
    pub kind: ActionKind,
    /// Volume asked for by the schedule.
    pub requested_volume: Decimal,
    /// Volume actually moved after rate and capacity clamping.
    pub actual_volume: Decimal,
    /// Oracle price used for the action.
    pub price: Decimal,
    /// Signed cash flow: negative for purchases, positive for sales.
    pub cash_flow: Decimal,
    /// Inventory level once the action has been applied.
    pub level_after: Decimal,
}

impl EventOutcome {
    /// True when the action moved less than requested.
    pub fn was_clamped(&self) -> bool {
        self.actual_volume < self.requested_volume
    }
}

/// Result of a storage contract valuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractValuation {
    /// `total_revenue - total_cost`.
    pub net_value: Decimal,
    /// Purchase cost of injected volume plus the terminal storage charge.
    pub total_cost: Decimal,
    /// Sale proceeds of withdrawn volume.
    pub total_revenue: Decimal,
    /// One-time storage charge on the terminal inventory (already inside `total_cost`).
    pub storage_charge: Decimal,
    /// Inventory left in storage after the last action.
    pub final_level: Decimal,
    /// Per-action breakdown in processing order.
    pub events: Vec<EventOutcome>,
}

/// Valuation, data and input errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Negative rate or capacity, non-finite number, malformed date.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The price oracle cannot resolve a date.
    #[error("price unavailable for {date}")]
    PriceUnavailable { date: NaiveDate },
    /// Malformed or missing persisted price data.
    #[error("data load error: {0}")]
    DataLoad(String),
    /// Decimal overflow or an unrepresentable model output.
    #[error("numerical error: {0}")]
    NumericalError(String),
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Shorthand for [`PricingError::DataLoad`].
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad(msg.into())
    }
}

impl From<csv::Error> for PricingError {
    fn from(e: csv::Error) -> Self {
        Self::DataLoad(e.to_string())
    }
}

impl From<std::io::Error> for PricingError {
    fn from(e: std::io::Error) -> Self {
        Self::DataLoad(e.to_string())
    }
}

/// Multiplies two decimals, mapping overflow to [`PricingError::NumericalError`].
#[inline]
pub(crate) fn checked_product(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_mul(b)
        .ok_or_else(|| PricingError::NumericalError(format!("decimal overflow in {a} * {b}")))
}

/// Adds two decimals, mapping overflow to [`PricingError::NumericalError`].
#[inline]
pub(crate) fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal, PricingError> {
    a.checked_add(b)
        .ok_or_else(|| PricingError::NumericalError(format!("decimal overflow in {a} + {b}")))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn error_messages_name_the_failure() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
        assert_eq!(
            PricingError::PriceUnavailable { date }.to_string(),
            "price unavailable for 2023-06-30"
        );
        assert_eq!(
            PricingError::invalid("max_volume must be >= 0").to_string(),
            "invalid parameter: max_volume must be >= 0"
        );
    }

    #[test]
    fn checked_product_reports_overflow() {
        assert_eq!(checked_product(dec!(2.5), dec!(4)).unwrap(), dec!(10));
        assert!(matches!(
            checked_product(Decimal::MAX, dec!(2)),
            Err(PricingError::NumericalError(_))
        ));
    }

    #[test]
    fn clamped_outcome_is_flagged() {
        let outcome = EventOutcome {
            date: NaiveDate::from_ymd_opt(2023, 7, 31).unwrap(),
            kind: ActionKind::Inject,
            requested_volume: dec!(100),
            actual_volume: dec!(50),
            price: dec!(2),
            cash_flow: dec!(-100),
            level_after: dec!(150),
        };
        assert!(outcome.was_clamped());
    }
}
