//! Data transfer objects.
//!
//! `client_state` is the on-disk document; the rest are backend wire records,
//! converted into core domain types at this boundary.

mod lenient;

pub mod client_state;
pub mod login;
pub mod score;
pub mod statement;

pub use client_state::{CLIENT_STATE_SCHEMA_VERSION, ClientStateDto, VoteRecordDto};
pub use login::LoginGrantDto;
pub use score::ScoreDto;
pub use statement::StatementDto;
