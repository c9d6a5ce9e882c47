//! Serde payloads for contract terms and price-source configuration.
//!
//! These types define the JSON layout used to persist storage contracts and
//! to tell the valuation pipeline where its prices come from.
//!
//! # Examples
//! ```rust
//! use gasferric::core::{from_json, to_json_pretty, PriceSourceConfig, ValuationConfig};
//!
//! let payload = r#"{
//!     "contract": {
//!         "injection_dates": ["2023-06-30", "2023-07-31"],
//!         "withdrawal_dates": ["2023-08-31", "2023-09-30"],
//!         "injection_rate": 100,
//!         "withdrawal_rate": 100,
//!         "max_volume": 500,
//!         "storage_cost_per_unit": 2
//!     },
//!     "price_source": { "kind": "flat", "price": 2.0 }
//! }"#;
//!
//! let config: ValuationConfig = from_json(payload).expect("json deserialization");
//! assert_eq!(config.contract.injection_dates.len(), 2);
//! assert!(matches!(config.price_source, PriceSourceConfig::Flat { .. }));
//!
//! let json = to_json_pretty(&config).expect("json serialization");
//! let decoded: ValuationConfig = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, config);
//! ```

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::EventOrdering;

/// Storage contract terms with ISO `YYYY-MM-DD` date strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageContractTerms {
    /// Injection dates as `YYYY-MM-DD`.
    pub injection_dates: Vec<String>,
    /// Withdrawal dates as `YYYY-MM-DD`.
    pub withdrawal_dates: Vec<String>,
    /// Volume requested on each injection date.
    pub injection_rate: Decimal,
    /// Volume requested on each withdrawal date.
    pub withdrawal_rate: Decimal,
    /// Storage capacity.
    pub max_volume: Decimal,
    /// One-time charge per unit left in storage at the end.
    pub storage_cost_per_unit: Decimal,
    /// Leg ordering; leg-sequential when omitted.
    #[serde(default)]
    pub ordering: EventOrdering,
}

/// Where the valuation pipeline resolves prices from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceSourceConfig {
    /// Exact-date lookup over a historical price file.
    Lookup { path: PathBuf },
    /// Linear trend fitted to a historical price file.
    Forecast { path: PathBuf },
    /// Same price on every date.
    Flat { price: Decimal },
}

/// Contract terms together with their price source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Terms of the contract to value.
    pub contract: StorageContractTerms,
    /// Oracle the contract is priced against.
    pub price_source: PriceSourceConfig,
}

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn ordering_defaults_to_leg_sequential() {
        let terms: StorageContractTerms = from_json(
            r#"{
                "injection_dates": [],
                "withdrawal_dates": [],
                "injection_rate": "100",
                "withdrawal_rate": 50.5,
                "max_volume": 500,
                "storage_cost_per_unit": 0
            }"#,
        )
        .unwrap();

        assert_eq!(terms.ordering, EventOrdering::LegSequential);
        assert_eq!(terms.injection_rate, dec!(100));
        assert_eq!(terms.withdrawal_rate, dec!(50.5));
    }

    #[test]
    fn price_source_is_tagged_by_kind() {
        let source: PriceSourceConfig =
            from_json(r#"{ "kind": "lookup", "path": "Nat_Gas.csv" }"#).unwrap();
        assert_eq!(
            source,
            PriceSourceConfig::Lookup {
                path: PathBuf::from("Nat_Gas.csv")
            }
        );
    }
}
