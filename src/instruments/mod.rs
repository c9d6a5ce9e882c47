//! Instrument definitions.

pub mod storage;

pub use storage::{
    StorageContract, StorageContractBuilder, decimal_param, parse_iso_date, parse_iso_dates,
};
