//! Command handler implementations for Xenophon CLI
//!
//! - `basic`: Recording and querying history (insert, list, last, period)
//! - `config`: Configuration display

mod basic;
mod config;

pub use basic::*;
pub use config::*;
