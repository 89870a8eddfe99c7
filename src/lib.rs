//! Bitfinex v2 authenticated wallet client library.
//!
//! Builds signed requests for wallet balances, transfers, deposit
//! addresses, withdrawals and movement history, and decodes the
//! exchange's positional array responses into typed records.

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod rest;
pub mod tls;

pub use error::{BfxError, Result};
