//! Market data: historical prices, the CSV loader, and price oracles.

pub mod history;
pub mod loader;
pub mod oracle;

pub use history::{PriceHistory, PriceRecord};
pub use loader::{
    PriceColumns, load_price_history, load_price_history_with, parse_price_date,
    read_price_history,
};
pub use oracle::{PriceOracle, PriceOracleClone, PriceSource};
