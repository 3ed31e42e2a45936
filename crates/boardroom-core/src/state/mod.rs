//! Persisted client state.

pub mod model;
pub mod repository;

pub use model::ClientState;
pub use repository::ClientStateRepository;
