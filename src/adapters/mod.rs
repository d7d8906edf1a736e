//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod env_config_adapter;
pub mod file_config_adapter;
pub mod http_trading_adapter;
