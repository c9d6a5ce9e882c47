//! Historical price records keyed by calendar date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::PricingError;
use crate::market::oracle::PriceOracle;

/// One observed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed price per MMBtu.
    pub price: Decimal,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// Date-ordered price history; doubles as the exact-match lookup oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceHistory {
    prices: BTreeMap<NaiveDate, Decimal>,
}

impl PriceHistory {
    /// Builds a history from records in any order.
    ///
    /// A date repeated with the same price is collapsed; a date repeated with
    /// a different price is rejected.
    pub fn from_records<I>(records: I) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = PriceRecord>,
    {
        let mut prices = BTreeMap::new();
        for record in records {
            if let Some(existing) = prices.insert(record.date, record.price)
                && existing != record.price
            {
                return Err(PricingError::data_load(format!(
                    "conflicting prices for {}: {existing} and {}",
                    record.date, record.price
                )));
            }
        }
        Ok(Self { prices })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Price observed on `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.get(&date).copied()
    }

    /// Earliest observation.
    pub fn first(&self) -> Option<PriceRecord> {
        self.prices
            .first_key_value()
            .map(|(date, price)| PriceRecord::new(*date, *price))
    }

    /// Latest observation.
    pub fn last(&self) -> Option<PriceRecord> {
        self.prices
            .last_key_value()
            .map(|(date, price)| PriceRecord::new(*date, *price))
    }

    /// Records in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = PriceRecord> + '_ {
        self.prices
            .iter()
            .map(|(date, price)| PriceRecord::new(*date, *price))
    }
}

impl PriceOracle for PriceHistory {
    fn price_at(&self, date: NaiveDate) -> Result<Decimal, PricingError> {
        self.get(date).ok_or(PricingError::PriceUnavailable { date })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn records_are_sorted_by_date() {
        let history = PriceHistory::from_records(vec![
            PriceRecord::new(d(2021, 1, 31), dec!(10.9)),
            PriceRecord::new(d(2020, 10, 31), dec!(10.1)),
            PriceRecord::new(d(2020, 12, 31), dec!(11.8)),
        ])
        .unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.first().unwrap().date, d(2020, 10, 31));
        assert_eq!(history.last().unwrap().price, dec!(10.9));
        let dates: Vec<_> = history.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2020, 10, 31), d(2020, 12, 31), d(2021, 1, 31)]);
    }

    #[test]
    fn repeated_identical_record_is_collapsed() {
        let history = PriceHistory::from_records(vec![
            PriceRecord::new(d(2020, 10, 31), dec!(10.1)),
            PriceRecord::new(d(2020, 10, 31), dec!(10.10)),
        ])
        .unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn conflicting_duplicate_is_rejected() {
        let err = PriceHistory::from_records(vec![
            PriceRecord::new(d(2020, 10, 31), dec!(10.1)),
            PriceRecord::new(d(2020, 10, 31), dec!(9.9)),
        ])
        .unwrap_err();
        assert!(matches!(err, PricingError::DataLoad(_)));
    }

    #[test]
    fn lookup_requires_exact_date() {
        let history =
            PriceHistory::from_records(vec![PriceRecord::new(d(2023, 6, 30), dec!(11))]).unwrap();
        assert_eq!(history.price_at(d(2023, 6, 30)).unwrap(), dec!(11));
        assert_eq!(
            history.price_at(d(2023, 6, 29)),
            Err(PricingError::PriceUnavailable { date: d(2023, 6, 29) })
        );
    }
}
