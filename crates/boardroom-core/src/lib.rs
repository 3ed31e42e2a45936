//! Domain layer for the Boardroom Battles voting client.
//!
//! Everything in this crate is free of I/O: the session and ledger models,
//! the statement projection with its expiry rules, the error taxonomy, and the
//! traits that the infrastructure layer implements (remote API, persistence).

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod results;
pub mod session;
pub mod state;
pub mod statement;
pub mod view;

// Re-export common error type
pub use error::{BoardroomError, Result};
