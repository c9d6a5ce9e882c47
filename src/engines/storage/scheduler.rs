//! Turns the injection and withdrawal legs into one ordered event sequence.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{ActionKind, EventOrdering, PricingError};

/// One scheduled storage action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Calendar date of the action.
    pub date: NaiveDate,
    /// Injection or withdrawal.
    pub kind: ActionKind,
    /// Requested volume; the simulator may move less.
    pub volume: Decimal,
}

impl ContractEvent {
    /// Injection of `volume` on `date`.
    pub fn inject(date: NaiveDate, volume: Decimal) -> Self {
        Self {
            date,
            kind: ActionKind::Inject,
            volume,
        }
    }

    /// Withdrawal of `volume` on `date`.
    pub fn withdraw(date: NaiveDate, volume: Decimal) -> Self {
        Self {
            date,
            kind: ActionKind::Withdraw,
            volume,
        }
    }
}

/// Builds the event sequence for a contract.
///
/// Every date requests the full configured rate. With
/// [`EventOrdering::LegSequential`] all injections come first in caller order,
/// then all withdrawals in caller order, regardless of calendar dates. With
/// [`EventOrdering::Chronological`] the same events are stably sorted by date,
/// injections first on a shared date.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use gasferric::core::{ActionKind, EventOrdering};
/// use gasferric::engines::storage::schedule_events;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).unwrap();
/// let events = schedule_events(
///     &[d(9, 1)],
///     &[d(8, 1)],
///     dec!(100),
///     dec!(100),
///     EventOrdering::LegSequential,
/// )
/// .unwrap();
/// assert_eq!(events[0].kind, ActionKind::Inject);
/// assert_eq!(events[1].date, d(8, 1));
/// ```
pub fn schedule_events(
    injection_dates: &[NaiveDate],
    withdrawal_dates: &[NaiveDate],
    injection_rate: Decimal,
    withdrawal_rate: Decimal,
    ordering: EventOrdering,
) -> Result<Vec<ContractEvent>, PricingError> {
    if injection_rate.is_sign_negative() && !injection_rate.is_zero() {
        return Err(PricingError::invalid("injection_rate must be >= 0"));
    }
    if withdrawal_rate.is_sign_negative() && !withdrawal_rate.is_zero() {
        return Err(PricingError::invalid("withdrawal_rate must be >= 0"));
    }

    let mut events = Vec::with_capacity(injection_dates.len() + withdrawal_dates.len());
    events.extend(
        injection_dates
            .iter()
            .map(|&date| ContractEvent::inject(date, injection_rate)),
    );
    events.extend(
        withdrawal_dates
            .iter()
            .map(|&date| ContractEvent::withdraw(date, withdrawal_rate)),
    );

    if ordering == EventOrdering::Chronological {
        // `sort_by_key` is stable, so same-day same-kind events keep caller order.
        events.sort_by_key(|event| (event.date, event.kind));
    }

    Ok(events)
}
