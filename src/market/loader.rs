//! CSV loader for historical price series.
//!
//! The expected layout is a header row with a date column and a price column
//! (`Dates` and `Prices` by default). Dates are normalised to [`NaiveDate`] at
//! ingestion; `MM/DD/YY`, `MM/DD/YYYY` and ISO `YYYY-MM-DD` are accepted.
//! Prices may be plain decimals or scientific notation (`1.01E+01`). A price
//! cell that does not parse is treated as missing and the row is skipped.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::PricingError;
use crate::market::history::{PriceHistory, PriceRecord};

const DATE_FORMATS: [&str; 3] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d"];

/// Header names of the date and price columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceColumns {
    pub date: String,
    pub price: String,
}

impl Default for PriceColumns {
    fn default() -> Self {
        Self {
            date: "Dates".to_string(),
            price: "Prices".to_string(),
        }
    }
}

/// Loads a price history from a CSV file with the default column names.
pub fn load_price_history<P: AsRef<Path>>(path: P) -> Result<PriceHistory, PricingError> {
    load_price_history_with(path, &PriceColumns::default())
}

/// Loads a price history from a CSV file with explicit column names.
pub fn load_price_history_with<P: AsRef<Path>>(
    path: P,
    columns: &PriceColumns,
) -> Result<PriceHistory, PricingError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        PricingError::data_load(format!("cannot open price file {}: {e}", path.display()))
    })?;
    let history = read_price_history(file, columns)?;
    debug!(
        path = %path.display(),
        records = history.len(),
        "loaded price history"
    );
    Ok(history)
}

/// Reads a price history from any CSV source.
pub fn read_price_history<R: Read>(
    reader: R,
    columns: &PriceColumns,
) -> Result<PriceHistory, PricingError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let date_idx = column_index(&headers, &columns.date)?;
    let price_idx = column_index(&headers, &columns.price)?;

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1.
        let line = row + 2;

        let raw_date = record.get(date_idx).unwrap_or_default();
        if raw_date.is_empty() {
            return Err(PricingError::data_load(format!(
                "line {line}: missing date in column `{}`",
                columns.date
            )));
        }
        let date = parse_price_date(raw_date).map_err(|_| {
            PricingError::data_load(format!("line {line}: unparsable date `{raw_date}`"))
        })?;

        let raw_price = record.get(price_idx).unwrap_or_default();
        match parse_price(raw_price) {
            Some(price) => records.push(PriceRecord::new(date, price)),
            None => {
                skipped += 1;
                warn!(line, date = %date, value = raw_price, "skipping row with missing price");
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, "rows without a usable price");
    }
    PriceHistory::from_records(records)
}

/// Parses a date in any of the accepted loader formats.
pub fn parse_price_date(raw: &str) -> Result<NaiveDate, PricingError> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| PricingError::invalid(format!("unrecognised date `{raw}`")))
}

fn parse_price(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(price) = Decimal::from_str(raw) {
        return Some(price);
    }
    let normalised = raw.replace("E+", "E").replace("e+", "e");
    Decimal::from_scientific(&normalised).ok()
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, PricingError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| PricingError::data_load(format!("missing column `{name}`")))
}
