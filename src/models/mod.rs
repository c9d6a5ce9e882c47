//! Price models used to back forecast oracles.

pub mod trend;

pub use trend::LinearTrendForecast;
