//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or filesystem types in any signature
//! - Storage is string-in/string-out; serialization stays in the core
//! - One synthesis request in flight at a time

pub mod state_store;
pub mod synthesis;

use thiserror::Error;

pub use state_store::StateStore;
pub use synthesis::{BackendError, ServerHealth, SynthesisBackend, SynthesisOutcome};

#[cfg(test)]
pub use synthesis::MockSynthesisBackend;

/// Errors from a [`StateStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem or storage backend failure.
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be serialized for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be used by this store.
    #[error("Invalid key '{0}'")]
    InvalidKey(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Request failed validation before reaching the backend.
    #[error(transparent)]
    Request(#[from] crate::domain::RequestError),

    /// Backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A loading session was still active.
    #[error(transparent)]
    Loading(#[from] crate::loading::LoadingError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),
}
