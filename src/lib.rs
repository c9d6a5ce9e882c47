//! gasferric values natural-gas storage contracts: buy and inject gas on some
//! dates, withdraw and sell it on others, subject to per-date rate limits, a
//! storage capacity, and a storage charge on what is left at the end.
//!
//! The crate is a short pipeline of explicit, independently testable stages:
//! price data loader -> price oracle -> event scheduler -> storage simulator.
//!
//! - [`market`] loads historical prices and defines the [`market::PriceOracle`]
//!   capability (exact-date lookup, fitted trend, flat, or user supplied).
//! - [`models`] fits the linear price trend used by forecast oracles.
//! - [`instruments`] holds the validated [`instruments::StorageContract`] terms.
//! - [`engines::storage`] schedules the contract legs and simulates inventory.
//! - [`pricing`] offers one-call helpers over plain strings and floats.
//!
//! Numerical considerations:
//! - Volumes, prices and cash amounts are `rust_decimal::Decimal`; no rounding
//!   is applied anywhere, formatting is left to the caller.
//! - Only the trend fit works in `f64`; its point estimates are converted to
//!   `Decimal` when the oracle answers.
//! - Inventory never leaves `[0, capacity]`: actions are clamped, not rejected.
//!
//! # Quick Start
//! Value a contract against a constant price:
//! ```rust
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//! use gasferric::market::PriceSource;
//! use gasferric::pricing::{format_contract_value, price_gas_contract};
//!
//! let value = price_gas_contract(
//!     &["2023-06-30", "2023-07-31"],
//!     &["2023-08-31", "2023-09-30"],
//!     100.0,
//!     100.0,
//!     500.0,
//!     2.0,
//!     &PriceSource::Flat(dec!(2.0)),
//! )
//! .unwrap();
//! assert_eq!(value, Decimal::ZERO);
//! assert_eq!(format_contract_value(value.normalize()), "The value of the gas contract is: 0");
//! ```
//!
//! Compose the stages yourself and inspect the breakdown:
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use gasferric::core::PricingEngine;
//! use gasferric::engines::StorageEngine;
//! use gasferric::instruments::StorageContract;
//! use gasferric::market::{PriceHistory, PriceRecord};
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
//! let history = PriceHistory::from_records(vec![
//!     PriceRecord::new(d(6, 30), dec!(10.0)),
//!     PriceRecord::new(d(7, 31), dec!(10.5)),
//!     PriceRecord::new(d(12, 31), dec!(12.0)),
//! ])
//! .unwrap();
//!
//! let contract = StorageContract::builder()
//!     .inject_on(d(6, 30))
//!     .inject_on(d(7, 31))
//!     .withdraw_on(d(12, 31))
//!     .injection_rate(dec!(100))
//!     .withdrawal_rate(dec!(150))
//!     .max_volume(dec!(150))
//!     .storage_cost_per_unit(dec!(0.1))
//!     .build()
//!     .unwrap();
//!
//! let valuation = StorageEngine::new().price(&contract, &history).unwrap();
//! assert_eq!(valuation.events[1].actual_volume, dec!(50));
//! assert_eq!(valuation.total_cost, dec!(1525));
//! assert_eq!(valuation.net_value, dec!(275));
//! ```
//!
//! Fit a trend and forecast any date:
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use gasferric::market::{PriceHistory, PriceOracle, PriceRecord};
//! use gasferric::models::LinearTrendForecast;
//!
//! let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
//! let history = PriceHistory::from_records(vec![
//!     PriceRecord::new(d(2023, 1, 31), dec!(10)),
//!     PriceRecord::new(d(2023, 3, 2), dec!(11)),
//! ])
//! .unwrap();
//! let model = LinearTrendForecast::fit(&history).unwrap();
//! let future = model.price_at(d(2024, 1, 31)).unwrap();
//! assert!(future > dec!(11));
//! ```

pub mod core;
pub mod engines;
pub mod instruments;
pub mod market;
pub mod models;
pub mod pricing;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::StorageEngine;
    pub use crate::engines::storage::{
        ContractEvent, ContractLedger, StorageSimulator, StorageState, schedule_events,
    };
    pub use crate::instruments::*;
    pub use crate::market::*;
    pub use crate::models::*;
    pub use crate::pricing::*;
}
