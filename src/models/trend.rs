//! Linear price trend over calendar time.
//!
//! Fits `price = intercept + slope * days` by ordinary least squares, where
//! `days` counts calendar days from the first observation. The fitted model is
//! read-only and answers any date, before or after the observed range.

use chrono::{Datelike, NaiveDate};
use nalgebra::{Matrix2, Vector2};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::core::PricingError;
use crate::market::{PriceHistory, PriceOracle};

/// Least-squares linear trend fitted to a price history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrendForecast {
    origin: NaiveDate,
    last_observed: NaiveDate,
    intercept: f64,
    slope: f64,
    observations: usize,
}

impl LinearTrendForecast {
    /// Fits the trend to every record in `history`.
    ///
    /// A history whose observations all fall on one date has no defined slope;
    /// the model then degenerates to the mean price.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use rust_decimal_macros::dec;
    /// use gasferric::market::{PriceHistory, PriceRecord};
    /// use gasferric::models::LinearTrendForecast;
    ///
    /// let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
    /// let history = PriceHistory::from_records(vec![
    ///     PriceRecord::new(d(1, 1), dec!(10)),
    ///     PriceRecord::new(d(1, 11), dec!(11)),
    /// ])
    /// .unwrap();
    ///
    /// let model = LinearTrendForecast::fit(&history).unwrap();
    /// assert!((model.predict(d(1, 21)) - 12.0).abs() < 1e-9);
    /// ```
    pub fn fit(history: &PriceHistory) -> Result<Self, PricingError> {
        let (Some(first), Some(last)) = (history.first(), history.last()) else {
            return Err(PricingError::invalid("cannot fit a price trend to an empty history"));
        };
        let origin = first.date;

        let mut s1 = 0.0_f64;
        let mut s_x = 0.0_f64;
        let mut s_x2 = 0.0_f64;
        let mut s_y = 0.0_f64;
        let mut s_xy = 0.0_f64;

        for record in history.iter() {
            let x = (record.date - origin).num_days() as f64;
            let y = record.price.to_f64().ok_or_else(|| {
                PricingError::NumericalError(format!(
                    "price {} on {} is not representable as f64",
                    record.price, record.date
                ))
            })?;
            s1 += 1.0;
            s_x += x;
            s_x2 += x * x;
            s_y += y;
            s_xy += x * y;
        }

        let xtx = Matrix2::new(s1, s_x, s_x, s_x2);
        let xty = Vector2::new(s_y, s_xy);
        let (intercept, slope) = if xtx.determinant().abs() > f64::EPSILON * s1 * s_x2.max(1.0) {
            match xtx.lu().solve(&xty) {
                Some(beta) => (beta[0], beta[1]),
                None => (s_y / s1, 0.0),
            }
        } else {
            (s_y / s1, 0.0)
        };

        Ok(Self {
            origin,
            last_observed: last.date,
            intercept,
            slope,
            observations: history.len(),
        })
    }

    /// First observed date; day offsets are measured from here.
    pub fn origin(&self) -> NaiveDate {
        self.origin
    }

    /// Last observed date.
    pub fn last_observed(&self) -> NaiveDate {
        self.last_observed
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn slope_per_day(&self) -> f64 {
        self.slope
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Point estimate for `date` in f64.
    pub fn predict(&self, date: NaiveDate) -> f64 {
        let days = (date - self.origin).num_days() as f64;
        self.slope.mul_add(days, self.intercept)
    }

    /// Trend prices at the next `months` month-ends strictly after the last observation.
    pub fn project_month_ends(&self, months: usize) -> Vec<(NaiveDate, f64)> {
        let mut out = Vec::with_capacity(months);
        let mut year = self.last_observed.year();
        let mut month = self.last_observed.month();
        let mut candidate = month_end(year, month);
        if candidate == self.last_observed {
            (year, month) = next_month(year, month);
            candidate = month_end(year, month);
        }

        while out.len() < months {
            out.push((candidate, self.predict(candidate)));
            (year, month) = next_month(year, month);
            candidate = month_end(year, month);
        }
        out
    }
}

impl PriceOracle for LinearTrendForecast {
    fn price_at(&self, date: NaiveDate) -> Result<Decimal, PricingError> {
        let estimate = self.predict(date);
        Decimal::from_f64(estimate).ok_or_else(|| {
            PricingError::NumericalError(format!(
                "trend estimate {estimate} for {date} is outside the decimal range"
            ))
        })
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next) = next_month(year, month);
    NaiveDate::from_ymd_opt(next_year, next, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
