//! Client-side vote eligibility bookkeeping.

pub mod model;

pub use model::{MAX_VOTES_PER_STATEMENT, VoteChoice, VoteLedger, VoteRecord};
