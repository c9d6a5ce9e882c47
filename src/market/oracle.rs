//! Price oracle abstraction and the composite price source used by valuations.
//!
//! Key types: [`PriceOracle`] is the only capability the storage simulator needs;
//! [`PriceSource`] bundles the concrete strategies (flat, historical lookup,
//! fitted trend, or any user oracle) behind one cloneable value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{PriceSourceConfig, PricingError};
use crate::market::history::PriceHistory;
use crate::market::loader::load_price_history;
use crate::models::LinearTrendForecast;

/// Clone support for boxed price oracle trait objects.
pub trait PriceOracleClone {
    /// Clones the concrete oracle behind the trait object.
    fn clone_box(&self) -> Box<dyn PriceOracle>;
}

impl<T> PriceOracleClone for T
where
    T: 'static + PriceOracle + Clone,
{
    fn clone_box(&self) -> Box<dyn PriceOracle> {
        Box::new(self.clone())
    }
}

/// Resolves a commodity price for a calendar date.
///
/// Implementations are read-only once constructed, so a single oracle can be
/// shared across independent valuation runs.
pub trait PriceOracle: std::fmt::Debug + Send + Sync + PriceOracleClone {
    /// Returns the price for `date` or [`PricingError::PriceUnavailable`].
    fn price_at(&self, date: NaiveDate) -> Result<Decimal, PricingError>;
}

impl Clone for Box<dyn PriceOracle> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Price source for a valuation run.
#[derive(Debug, Clone)]
pub enum PriceSource {
    /// Constant price on every date.
    Flat(Decimal),
    /// Exact-date lookup over historical records.
    Lookup(PriceHistory),
    /// Point estimate from a fitted linear trend.
    Forecast(LinearTrendForecast),
    /// Any other oracle implementation.
    Custom(Box<dyn PriceOracle>),
}

impl PriceSource {
    /// Builds a price source from its persisted configuration, loading and
    /// fitting price files as needed.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use rust_decimal_macros::dec;
    /// use gasferric::core::PriceSourceConfig;
    /// use gasferric::market::{PriceOracle, PriceSource};
    ///
    /// let source = PriceSource::from_config(&PriceSourceConfig::Flat { price: dec!(2.5) }).unwrap();
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    /// assert_eq!(source.price_at(date).unwrap(), dec!(2.5));
    /// ```
    pub fn from_config(config: &PriceSourceConfig) -> Result<Self, PricingError> {
        match config {
            PriceSourceConfig::Flat { price } => Ok(Self::Flat(*price)),
            PriceSourceConfig::Lookup { path } => {
                let history = load_price_history(path)?;
                Ok(Self::Lookup(history))
            }
            PriceSourceConfig::Forecast { path } => {
                let history = load_price_history(path)?;
                let model = LinearTrendForecast::fit(&history)?;
                debug!(
                    slope_per_day = model.slope_per_day(),
                    intercept = model.intercept(),
                    "fitted forecast oracle"
                );
                Ok(Self::Forecast(model))
            }
        }
    }

    /// Short label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Flat(_) => "flat",
            Self::Lookup(_) => "lookup",
            Self::Forecast(_) => "forecast",
            Self::Custom(_) => "custom",
        }
    }
}

impl PriceOracle for PriceSource {
    fn price_at(&self, date: NaiveDate) -> Result<Decimal, PricingError> {
        match self {
            Self::Flat(price) => Ok(*price),
            Self::Lookup(history) => history.price_at(date),
            Self::Forecast(model) => model.price_at(date),
            Self::Custom(oracle) => oracle.price_at(date),
        }
    }
}

impl From<PriceHistory> for PriceSource {
    fn from(history: PriceHistory) -> Self {
        Self::Lookup(history)
    }
}

impl From<LinearTrendForecast> for PriceSource {
    fn from(model: LinearTrendForecast) -> Self {
        Self::Forecast(model)
    }
}
