//! Statements published by judges.

pub mod model;

pub use model::{Stance, Statement, StatementId, parse_duration_minutes, validate_duration_minutes};
