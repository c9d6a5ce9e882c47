// Property checks for the inventory simulation.

use chrono::{Days, NaiveDate};
use gasferric::core::EventOrdering;
use gasferric::engines::storage::{ContractEvent, StorageSimulator, StorageState, schedule_events};
use gasferric::market::PriceSource;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()
}

fn dates(offsets: &[u16]) -> Vec<NaiveDate> {
    offsets
        .iter()
        .map(|&o| base() + Days::new(u64::from(o)))
        .collect()
}

fn volume() -> impl Strategy<Value = Decimal> {
    (0_u32..5_000).prop_map(|v| Decimal::new(i64::from(v), 1))
}

fn event() -> impl Strategy<Value = ContractEvent> {
    (any::<bool>(), 0_u16..720, volume()).prop_map(|(inject, offset, vol)| {
        let date = base() + Days::new(u64::from(offset));
        if inject {
            ContractEvent::inject(date, vol)
        } else {
            ContractEvent::withdraw(date, vol)
        }
    })
}

proptest! {
    #[test]
    fn level_stays_within_capacity(
        events in prop::collection::vec(event(), 0..40),
        capacity in volume(),
        injection_rate in volume(),
        withdrawal_rate in volume(),
    ) {
        let state = StorageState::new(capacity, injection_rate, withdrawal_rate).unwrap();
        let valuation = StorageSimulator::new(Decimal::ONE)
            .unwrap()
            .simulate(&events, state, &PriceSource::Flat(Decimal::TWO))
            .unwrap();

        let mut before = Decimal::ZERO;
        for outcome in &valuation.events {
            prop_assert!(outcome.level_after >= Decimal::ZERO);
            prop_assert!(outcome.level_after <= capacity);
            prop_assert!(outcome.actual_volume <= outcome.requested_volume);
            if outcome.kind == gasferric::core::ActionKind::Withdraw {
                prop_assert!(outcome.actual_volume <= before);
            }
            before = outcome.level_after;
        }
        prop_assert_eq!(valuation.final_level, before);
        prop_assert_eq!(
            valuation.net_value,
            valuation.total_revenue - valuation.total_cost
        );
    }

    #[test]
    fn injection_order_does_not_change_cost_at_flat_price(
        offsets in prop::collection::vec(0_u16..365, 0..12),
        capacity in volume(),
        rate in volume(),
    ) {
        let forward = dates(&offsets);
        let mut reversed = forward.clone();
        reversed.reverse();

        let run = |injections: &[NaiveDate]| {
            let events = schedule_events(
                injections,
                &[],
                rate,
                Decimal::ZERO,
                EventOrdering::LegSequential,
            )
            .unwrap();
            let state = StorageState::new(capacity, rate, Decimal::ZERO).unwrap();
            StorageSimulator::new(Decimal::ZERO)
                .unwrap()
                .simulate(&events, state, &PriceSource::Flat(Decimal::new(275, 2)))
                .unwrap()
                .total_cost
        };
        prop_assert_eq!(run(&forward[..]), run(&reversed[..]));
    }

    #[test]
    fn chronological_schedule_is_sorted_and_complete(
        inj in prop::collection::vec(0_u16..365, 0..10),
        wd in prop::collection::vec(0_u16..365, 0..10),
    ) {
        let events = schedule_events(
            &dates(&inj),
            &dates(&wd),
            Decimal::ONE,
            Decimal::ONE,
            EventOrdering::Chronological,
        )
        .unwrap();
        prop_assert_eq!(events.len(), inj.len() + wd.len());
        prop_assert!(events.windows(2).all(|w| (w[0].date, w[0].kind) <= (w[1].date, w[1].kind)));
    }
}
