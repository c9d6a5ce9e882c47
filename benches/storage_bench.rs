use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gasferric::core::{EventOrdering, PricingEngine};
use gasferric::engines::StorageEngine;
use gasferric::instruments::StorageContract;
use gasferric::market::{PriceHistory, PriceRecord, PriceSource};
use gasferric::models::LinearTrendForecast;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::hint::black_box;

// Performance goals (guideline, measured on target hardware):
// - 4-event contract, flat oracle: < 2 us
// - 10 years of daily events, lookup oracle: < 5 ms

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid start date")
}

fn daily_history(days: u64) -> PriceHistory {
    PriceHistory::from_records((0..days).map(|i| {
        let seasonal = Decimal::from(i % 365) / dec!(100);
        PriceRecord::new(start() + Days::new(i), dec!(10) + seasonal)
    }))
    .expect("benchmark history should be valid")
}

fn daily_contract(days: u64, ordering: EventOrdering) -> StorageContract {
    StorageContract::builder()
        .injection_dates((0..days).step_by(2).map(|i| start() + Days::new(i)))
        .withdrawal_dates((1..days).step_by(2).map(|i| start() + Days::new(i)))
        .injection_rate(dec!(1000))
        .withdrawal_rate(dec!(800))
        .max_volume(dec!(50000))
        .storage_cost_per_unit(dec!(0.05))
        .ordering(ordering)
        .build()
        .expect("benchmark contract should be valid")
}

fn bench_reference_contract(c: &mut Criterion) {
    let d = |m, day| NaiveDate::from_ymd_opt(2023, m, day).expect("valid date");
    let contract = StorageContract::builder()
        .inject_on(d(6, 30))
        .inject_on(d(7, 31))
        .withdraw_on(d(8, 31))
        .withdraw_on(d(9, 30))
        .injection_rate(dec!(100))
        .withdrawal_rate(dec!(100))
        .max_volume(dec!(500))
        .storage_cost_per_unit(dec!(2))
        .build()
        .expect("benchmark contract should be valid");
    let oracle = PriceSource::Flat(dec!(2));
    let engine = StorageEngine::new();

    c.bench_function("storage_reference_contract", |b| {
        b.iter(|| {
            let value = engine
                .price(black_box(&contract), black_box(&oracle))
                .expect("valuation should succeed")
                .net_value;
            black_box(value)
        })
    });
}

fn bench_daily_schedule(c: &mut Criterion) {
    let history = daily_history(3650);
    let lookup = PriceSource::Lookup(history.clone());
    let forecast =
        PriceSource::Forecast(LinearTrendForecast::fit(&history).expect("fit should succeed"));
    let engine = StorageEngine::new();

    let mut group = c.benchmark_group("storage_daily_schedule");
    for days in [365_u64, 3650] {
        let leg = daily_contract(days, EventOrdering::LegSequential);
        let calendar = daily_contract(days, EventOrdering::Chronological);

        group.bench_with_input(BenchmarkId::new("lookup_leg", days), &leg, |b, contract| {
            b.iter(|| black_box(engine.price(black_box(contract), &lookup)))
        });
        group.bench_with_input(
            BenchmarkId::new("lookup_chronological", days),
            &calendar,
            |b, contract| b.iter(|| black_box(engine.price(black_box(contract), &lookup))),
        );
        group.bench_with_input(BenchmarkId::new("forecast_leg", days), &leg, |b, contract| {
            b.iter(|| black_box(engine.price(black_box(contract), &forecast)))
        });
    }
    group.finish();
}

fn bench_trend_fit(c: &mut Criterion) {
    let history = daily_history(3650);
    c.bench_function("linear_trend_fit_3650", |b| {
        b.iter(|| black_box(LinearTrendForecast::fit(black_box(&history))))
    });
}

criterion_group!(
    benches,
    bench_reference_contract,
    bench_daily_schedule,
    bench_trend_fit
);
criterion_main!(benches);
