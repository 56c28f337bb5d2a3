use errors::Error;

pub mod configuration;
pub mod digest;
pub mod domain;
pub mod errors;
pub mod identity_client;
pub mod session_store;
pub mod telemetry;
pub mod workflow;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
