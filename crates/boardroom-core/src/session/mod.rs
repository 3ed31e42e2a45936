//! Authenticated session and display preferences.

pub mod model;

pub use model::{Credentials, Role, Session, Theme};
