//! Storage contract valuation engine.
//!
//! Composition is Scheduler -> Simulator: [`schedule_events`] turns the
//! contract legs into events, and [`StorageSimulator`] walks them against a
//! [`PriceOracle`](crate::market::PriceOracle).

pub mod scheduler;
pub mod simulator;

pub use scheduler::{ContractEvent, schedule_events};
pub use simulator::{ContractLedger, StorageSimulator, StorageState};

use rust_decimal::Decimal;

use crate::core::{ContractValuation, PricingEngine, PricingError};
use crate::instruments::StorageContract;
use crate::market::PriceOracle;

/// Values [`StorageContract`]s, optionally from a non-empty starting inventory.
#[derive(Debug, Clone, Default)]
pub struct StorageEngine {
    initial_level: Decimal,
}

impl StorageEngine {
    /// Engine starting every run from empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine starting every run with `level` already in storage.
    pub fn with_initial_level(level: Decimal) -> Self {
        Self {
            initial_level: level,
        }
    }
}

impl PricingEngine<StorageContract> for StorageEngine {
    fn price(
        &self,
        instrument: &StorageContract,
        oracle: &dyn PriceOracle,
    ) -> Result<ContractValuation, PricingError> {
        instrument.validate()?;

        let events = schedule_events(
            &instrument.injection_dates,
            &instrument.withdrawal_dates,
            instrument.injection_rate,
            instrument.withdrawal_rate,
            instrument.ordering,
        )?;
        let state = StorageState::new(
            instrument.max_volume,
            instrument.injection_rate,
            instrument.withdrawal_rate,
        )?
        .with_level(self.initial_level)?;

        StorageSimulator::new(instrument.storage_cost_per_unit)?.simulate(&events, state, oracle)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core::EventOrdering;
    use crate::market::{PriceHistory, PriceRecord};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, day).unwrap()
    }

    fn history() -> PriceHistory {
        PriceHistory::from_records(vec![
            PriceRecord::new(d(6, 30), dec!(2)),
            PriceRecord::new(d(7, 31), dec!(3)),
            PriceRecord::new(d(8, 31), dec!(5)),
        ])
        .unwrap()
    }

    #[test]
    fn ordering_changes_value_when_withdrawal_precedes_injection() {
        let builder = StorageContract::builder()
            .inject_on(d(8, 31))
            .withdraw_on(d(7, 31))
            .injection_rate(dec!(10))
            .withdrawal_rate(dec!(10))
            .max_volume(dec!(100));

        let leg = builder.clone().build().unwrap();
        let chrono_contract = builder
            .ordering(EventOrdering::Chronological)
            .build()
            .unwrap();
        let engine = StorageEngine::new();

        // Leg order: buy 10 @ 5, then sell 10 @ 3.
        let leg_value = engine.price(&leg, &history()).unwrap();
        assert_eq!(leg_value.net_value, dec!(-20));

        // Calendar order: nothing to sell on 07-31, then buy 10 @ 5 and hold.
        let chrono_value = engine.price(&chrono_contract, &history()).unwrap();
        assert_eq!(chrono_value.events[0].actual_volume, Decimal::ZERO);
        assert_eq!(chrono_value.final_level, dec!(10));
        assert_eq!(chrono_value.net_value, dec!(-50));
    }

    #[test]
    fn initial_inventory_can_be_sold() {
        let contract = StorageContract::builder()
            .withdraw_on(d(8, 31))
            .injection_rate(dec!(10))
            .withdrawal_rate(dec!(10))
            .max_volume(dec!(100))
            .build()
            .unwrap();
        let valuation = StorageEngine::with_initial_level(dec!(40))
            .price(&contract, &history())
            .unwrap();
        assert_eq!(valuation.total_revenue, dec!(50));
        assert_eq!(valuation.final_level, dec!(30));
    }
}
