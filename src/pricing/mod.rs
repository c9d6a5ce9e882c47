//! Convenience pricing entry points over plain inputs.

pub mod storage;

pub use storage::{
    format_contract_value, price_gas_contract, price_gas_contract_from_file,
    price_gas_contract_with_forecast, value_storage_contract,
};
