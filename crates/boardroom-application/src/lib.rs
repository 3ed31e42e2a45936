//! Application layer for the Boardroom Battles client.
//!
//! Use cases that coordinate the backend gateway with the persisted client
//! state: authentication, the judge dashboard and the participant dashboard.

pub mod auth_service;
pub mod in_flight;
pub mod judge_workflow;
pub mod notice;
pub mod participant_workflow;
pub mod session_store;

pub use auth_service::AuthService;
pub use in_flight::{InFlight, InFlightGuard};
pub use judge_workflow::{JudgeWorkflow, ToggleOutcome};
pub use notice::Notice;
pub use participant_workflow::{ParticipantPhase, ParticipantWorkflow};
pub use session_store::{SessionStore, SharedSessionStore};
