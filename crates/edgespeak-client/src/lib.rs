//! HTTP adapter for the edgespeak TTS server.
//!
//! Implements [`edgespeak_core::SynthesisBackend`] over the server's REST
//! API (`/api/voices`, `/api/synthesize`, `/api/audio/{id}`, `/health`).
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// HttpSynthesisBackend is meant to be used through the SynthesisBackend port,
// not through its generic client structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::HttpSynthesisBackend;

// Configuration
pub use config::TtsClientConfig;

// Errors
pub use error::{ClientError, ClientResult};
