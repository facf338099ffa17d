//! Formatting helpers shared by views and renderers

pub mod helper;

pub use helper::{format_address, format_percentage, format_units, format_usd, percentage_change};
