//! Sequential storage simulation.
//!
//! Walks a scheduled event sequence, keeping `0 <= level <= capacity` by
//! clamping every action to the available headroom or inventory, and books the
//! clamped volume at the oracle price. The terminal inventory is charged the
//! storage cost once, after the last event.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::core::{
    ActionKind, ContractValuation, EventOutcome, PricingError, checked_product, checked_sum,
};
use crate::engines::storage::scheduler::ContractEvent;
use crate::market::PriceOracle;

/// Inventory and physical limits of one storage facility during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageState {
    level: Decimal,
    capacity: Decimal,
    injection_rate: Decimal,
    withdrawal_rate: Decimal,
}

impl StorageState {
    /// Empty storage with the given limits.
    pub fn new(
        capacity: Decimal,
        injection_rate: Decimal,
        withdrawal_rate: Decimal,
    ) -> Result<Self, PricingError> {
        for (name, value) in [
            ("capacity", capacity),
            ("injection_rate", injection_rate),
            ("withdrawal_rate", withdrawal_rate),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(PricingError::invalid(format!("{name} must be >= 0")));
            }
        }
        Ok(Self {
            level: Decimal::ZERO,
            capacity,
            injection_rate,
            withdrawal_rate,
        })
    }

    /// Starts from an existing inventory.
    pub fn with_level(mut self, level: Decimal) -> Result<Self, PricingError> {
        if level < Decimal::ZERO || level > self.capacity {
            return Err(PricingError::invalid(format!(
                "initial level {level} must lie in [0, {}]",
                self.capacity
            )));
        }
        self.level = level;
        Ok(self)
    }

    /// Current inventory.
    pub fn level(&self) -> Decimal {
        self.level
    }

    /// Maximum inventory.
    pub fn capacity(&self) -> Decimal {
        self.capacity
    }

    /// Most volume one injection may move.
    pub fn injection_rate(&self) -> Decimal {
        self.injection_rate
    }

    /// Most volume one withdrawal may move.
    pub fn withdrawal_rate(&self) -> Decimal {
        self.withdrawal_rate
    }

    /// Remaining room before the facility is full.
    pub fn headroom(&self) -> Decimal {
        self.capacity - self.level
    }

    /// Volume an action would actually move, without applying it.
    ///
    /// Injections are capped by the injection rate and the headroom,
    /// withdrawals by the withdrawal rate and the current level.
    pub fn admissible(&self, kind: ActionKind, requested: Decimal) -> Decimal {
        match kind {
            ActionKind::Inject => requested.min(self.injection_rate).min(self.headroom()),
            ActionKind::Withdraw => requested.min(self.withdrawal_rate).min(self.level),
        }
    }

    fn apply(&mut self, kind: ActionKind, actual: Decimal) {
        match kind {
            ActionKind::Inject => self.level += actual,
            ActionKind::Withdraw => self.level -= actual,
        }
    }
}

/// Running cost and revenue of a valuation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContractLedger {
    /// Purchase cost booked so far, plus the storage charge once applied.
    pub total_cost: Decimal,
    /// Sale proceeds booked so far.
    pub total_revenue: Decimal,
}

impl ContractLedger {
    /// `total_revenue - total_cost`.
    pub fn net_value(&self) -> Decimal {
        self.total_revenue - self.total_cost
    }
}

/// Storage simulator applying a terminal storage charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSimulator {
    storage_cost_per_unit: Decimal,
}

impl StorageSimulator {
    /// Simulator charging `storage_cost_per_unit` on the terminal inventory.
    pub fn new(storage_cost_per_unit: Decimal) -> Result<Self, PricingError> {
        if storage_cost_per_unit.is_sign_negative() && !storage_cost_per_unit.is_zero() {
            return Err(PricingError::invalid("storage_cost_per_unit must be >= 0"));
        }
        Ok(Self {
            storage_cost_per_unit,
        })
    }

    /// Charge per unit left in storage after the last event.
    pub fn storage_cost_per_unit(&self) -> Decimal {
        self.storage_cost_per_unit
    }

    /// Runs the events in order and returns the contract valuation.
    ///
    /// Each event moves `min(volume, rate, headroom)` on injection and
    /// `min(volume, rate, level)` on withdrawal, where `rate` comes from
    /// `initial_state`. Events built by [`schedule_events`] request exactly the
    /// rate, so the rate cap only bites on hand-built events that ask for more.
    ///
    /// [`schedule_events`]: crate::engines::storage::schedule_events
    ///
    /// The first oracle failure aborts the run; nothing from the failing
    /// event is booked and no partial valuation is returned.
    pub fn simulate(
        &self,
        events: &[ContractEvent],
        initial_state: StorageState,
        oracle: &dyn PriceOracle,
    ) -> Result<ContractValuation, PricingError> {
        let mut state = initial_state;
        let mut ledger = ContractLedger::default();
        let mut outcomes = Vec::with_capacity(events.len());

        for event in events {
            if event.volume.is_sign_negative() && !event.volume.is_zero() {
                return Err(PricingError::invalid(format!(
                    "{} volume on {} must be >= 0, got {}",
                    event.kind, event.date, event.volume
                )));
            }

            let price = oracle.price_at(event.date)?;
            let actual = state.admissible(event.kind, event.volume);
            let amount = checked_product(actual, price)?;

            match event.kind {
                ActionKind::Inject => {
                    ledger.total_cost = checked_sum(ledger.total_cost, amount)?;
                }
                ActionKind::Withdraw => {
                    ledger.total_revenue = checked_sum(ledger.total_revenue, amount)?;
                }
            }
            state.apply(event.kind, actual);

            if actual < event.volume {
                debug!(
                    date = %event.date,
                    kind = %event.kind,
                    requested = %event.volume,
                    actual = %actual,
                    "storage action clamped"
                );
            }
            trace!(
                date = %event.date,
                kind = %event.kind,
                price = %price,
                actual = %actual,
                level = %state.level(),
                "storage action"
            );

            outcomes.push(EventOutcome {
                date: event.date,
                kind: event.kind,
                requested_volume: event.volume,
                actual_volume: actual,
                price,
                cash_flow: event.kind.cash_sign() * amount,
                level_after: state.level(),
            });
        }

        let storage_charge = checked_product(state.level(), self.storage_cost_per_unit)?;
        ledger.total_cost = checked_sum(ledger.total_cost, storage_charge)?;

        let valuation = ContractValuation {
            net_value: ledger.net_value(),
            total_cost: ledger.total_cost,
            total_revenue: ledger.total_revenue,
            storage_charge,
            final_level: state.level(),
            events: outcomes,
        };
        debug!(
            events = events.len(),
            final_level = %valuation.final_level,
            total_cost = %valuation.total_cost,
            total_revenue = %valuation.total_revenue,
            net_value = %valuation.net_value,
            "storage simulation complete"
        );
        Ok(valuation)
    }
}
