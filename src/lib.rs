pub mod apis;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod parser;
pub mod records;
pub mod report;
pub mod types;
pub mod valuation;

pub use error::{AppraiserError, Result};
