//! SOLARMINE — Solar + grid Bitcoin mining economics calculator
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod error;
pub mod types;
pub mod catalog;
pub mod engine;
pub mod dashboard;
