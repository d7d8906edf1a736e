//! Core domain types and the session lifecycle.

pub mod connection;
pub mod error;
pub mod fetch_plan;
pub mod history_query;
pub mod output_path;
pub mod price_bar;
pub mod session;
