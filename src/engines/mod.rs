//! Valuation engine implementations.

pub mod storage;

pub use storage::StorageEngine;
