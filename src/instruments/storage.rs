//! Instrument definition for natural-gas storage contracts.
//!
//! Module gasferric::instruments::storage contains contract terms, their
//! validation, and parsing from the persisted [`StorageContractTerms`] payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::core::{EventOrdering, Instrument, PricingError, StorageContractTerms};

/// Storage contract: buy and inject on some dates, withdraw and sell on others.
///
/// Volumes are in MMBtu, rates in MMBtu per action date, prices and the
/// storage cost in currency per MMBtu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageContract {
    /// Dates on which gas is bought and injected, in caller order.
    pub injection_dates: Vec<NaiveDate>,
    /// Dates on which gas is withdrawn and sold, in caller order.
    pub withdrawal_dates: Vec<NaiveDate>,
    /// Volume requested on each injection date.
    pub injection_rate: Decimal,
    /// Volume requested on each withdrawal date.
    pub withdrawal_rate: Decimal,
    /// Storage capacity.
    pub max_volume: Decimal,
    /// One-time charge per unit left in storage after the last action.
    pub storage_cost_per_unit: Decimal,
    /// How the two legs are merged into one event sequence.
    pub ordering: EventOrdering,
}

impl StorageContract {
    /// Starts a contract builder.
    pub fn builder() -> StorageContractBuilder {
        StorageContractBuilder::default()
    }

    /// Validates rates, capacity and storage cost (all must be >= 0).
    pub fn validate(&self) -> Result<(), PricingError> {
        non_negative("injection_rate", self.injection_rate)?;
        non_negative("withdrawal_rate", self.withdrawal_rate)?;
        non_negative("max_volume", self.max_volume)?;
        non_negative("storage_cost_per_unit", self.storage_cost_per_unit)?;
        Ok(())
    }

    /// Parses and validates persisted contract terms.
    pub fn from_terms(terms: &StorageContractTerms) -> Result<Self, PricingError> {
        let contract = Self {
            injection_dates: parse_iso_dates(&terms.injection_dates)?,
            withdrawal_dates: parse_iso_dates(&terms.withdrawal_dates)?,
            injection_rate: terms.injection_rate,
            withdrawal_rate: terms.withdrawal_rate,
            max_volume: terms.max_volume,
            storage_cost_per_unit: terms.storage_cost_per_unit,
            ordering: terms.ordering,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Converts back to the persisted payload.
    pub fn to_terms(&self) -> StorageContractTerms {
        let iso = |dates: &[NaiveDate]| -> Vec<String> {
            dates
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect()
        };
        StorageContractTerms {
            injection_dates: iso(&self.injection_dates),
            withdrawal_dates: iso(&self.withdrawal_dates),
            injection_rate: self.injection_rate,
            withdrawal_rate: self.withdrawal_rate,
            max_volume: self.max_volume,
            storage_cost_per_unit: self.storage_cost_per_unit,
            ordering: self.ordering,
        }
    }
}

impl Instrument for StorageContract {
    fn instrument_type(&self) -> &str {
        "StorageContract"
    }
}

/// Builder for [`StorageContract`].
#[derive(Debug, Clone, Default)]
pub struct StorageContractBuilder {
    injection_dates: Vec<NaiveDate>,
    withdrawal_dates: Vec<NaiveDate>,
    injection_rate: Option<Decimal>,
    withdrawal_rate: Option<Decimal>,
    max_volume: Option<Decimal>,
    storage_cost_per_unit: Decimal,
    ordering: EventOrdering,
}

impl StorageContractBuilder {
    /// Appends one injection date.
    pub fn inject_on(mut self, date: NaiveDate) -> Self {
        self.injection_dates.push(date);
        self
    }

    /// Appends one withdrawal date.
    pub fn withdraw_on(mut self, date: NaiveDate) -> Self {
        self.withdrawal_dates.push(date);
        self
    }

    /// Appends injection dates in iteration order.
    pub fn injection_dates<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.injection_dates.extend(dates);
        self
    }

    /// Appends withdrawal dates in iteration order.
    pub fn withdrawal_dates<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.withdrawal_dates.extend(dates);
        self
    }

    /// Volume requested on each injection date (required).
    pub fn injection_rate(mut self, rate: Decimal) -> Self {
        self.injection_rate = Some(rate);
        self
    }

    /// Volume requested on each withdrawal date (required).
    pub fn withdrawal_rate(mut self, rate: Decimal) -> Self {
        self.withdrawal_rate = Some(rate);
        self
    }

    /// Storage capacity (required).
    pub fn max_volume(mut self, volume: Decimal) -> Self {
        self.max_volume = Some(volume);
        self
    }

    /// Defaults to zero.
    pub fn storage_cost_per_unit(mut self, cost: Decimal) -> Self {
        self.storage_cost_per_unit = cost;
        self
    }

    /// Defaults to [`EventOrdering::LegSequential`].
    pub fn ordering(mut self, ordering: EventOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Validates and builds a [`StorageContract`].
    pub fn build(self) -> Result<StorageContract, PricingError> {
        let required = |value: Option<Decimal>, name: &str| {
            value.ok_or_else(|| PricingError::invalid(format!("storage {name} is required")))
        };
        let contract = StorageContract {
            injection_rate: required(self.injection_rate, "injection_rate")?,
            withdrawal_rate: required(self.withdrawal_rate, "withdrawal_rate")?,
            max_volume: required(self.max_volume, "max_volume")?,
            injection_dates: self.injection_dates,
            withdrawal_dates: self.withdrawal_dates,
            storage_cost_per_unit: self.storage_cost_per_unit,
            ordering: self.ordering,
        };
        contract.validate()?;
        Ok(contract)
    }
}

/// Parses a strict ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, PricingError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        PricingError::invalid(format!("malformed date `{raw}`: expected YYYY-MM-DD"))
    })
}

/// Parses a list of ISO dates, failing on the first malformed entry.
pub fn parse_iso_dates<S: AsRef<str>>(raw: &[S]) -> Result<Vec<NaiveDate>, PricingError> {
    raw.iter().map(|s| parse_iso_date(s.as_ref())).collect()
}

/// Converts a caller-supplied float into a non-negative decimal parameter.
pub fn decimal_param(name: &str, value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::invalid(format!("storage {name} must be finite")));
    }
    let decimal = Decimal::from_f64(value)
        .ok_or_else(|| PricingError::invalid(format!("storage {name} is out of range")))?;
    non_negative(name, decimal)?;
    Ok(decimal)
}

fn non_negative(name: &str, value: Decimal) -> Result<(), PricingError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::invalid(format!("storage {name} must be >= 0")));
    }
    Ok(())
}
