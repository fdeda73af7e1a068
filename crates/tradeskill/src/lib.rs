//! # Tradeskill
//!
//! Command-line front end: parses arguments, loads the profession and price
//! tables, simulates leveling and prints what it cost.
//!
//! All pricing and progression logic lives in `tradeskill_economy`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod app;
pub mod args;
pub mod error;

pub use app::{format_cost, run};
pub use args::{parse, Args, Command, USAGE};
pub use error::CliError;
