//! Infrastructure layer for the Boardroom Battles client.
//!
//! Implements the core traits against the outside world: the backend over
//! HTTP, client state on disk, and configuration lookup.

pub mod backend_gateway;
pub mod config_service;
pub mod dto;
pub mod http_api_client;
pub mod memory_state_repository;
pub mod paths;
pub mod storage;
pub mod toml_state_repository;

pub use crate::backend_gateway::BackendGateway;
pub use crate::config_service::ConfigService;
pub use crate::http_api_client::HttpApiClient;
pub use crate::memory_state_repository::InMemoryClientStateRepository;
pub use crate::paths::BoardroomPaths;
pub use crate::toml_state_repository::TomlClientStateRepository;
