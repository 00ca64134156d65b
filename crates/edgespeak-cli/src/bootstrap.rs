//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Key-value store for learned performance data (`FileStateStore`)
//! - HTTP synthesis backend (via edgespeak-client)
//! - The synthesis orchestrator (via edgespeak-core)
//!
//! Command handlers receive the composed `CliContext` and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use edgespeak_client::{HttpSynthesisBackend, TtsClientConfig};
use edgespeak_core::{
    ClientSettings, FileStateStore, LoadingTuning, ModelTuning, OrchestratorEvent,
    PerformanceModel, SynthesisOrchestrator, resolve_data_root, validate_settings,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Client settings after command-line overrides.
    pub settings: ClientSettings,
    /// Directory holding learned performance data.
    pub data_dir: PathBuf,
}

impl CliConfig {
    /// Create config with default settings and data directory.
    pub fn with_defaults() -> Result<Self, CliError> {
        Self::with_overrides(None, None)
    }

    /// Apply `--server` and `--data-dir`, then validate.
    pub fn with_overrides(server: Option<&str>, data_dir: Option<&str>) -> Result<Self, CliError> {
        let mut settings = ClientSettings::with_defaults();
        if let Some(server) = server {
            settings.server_url = server.trim().to_string();
        }
        validate_settings(&settings).map_err(|e| CliError::Config(e.to_string()))?;

        Ok(Self {
            settings,
            data_dir: resolve_data_root(data_dir)?,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Validated client settings.
    pub settings: ClientSettings,
    /// The synthesis orchestrator.
    pub orchestrator: SynthesisOrchestrator,
    /// Notifications and progress events from the orchestrator.
    pub events: mpsc::UnboundedReceiver<OrchestratorEvent>,
    /// Directory holding learned performance data.
    pub data_dir: PathBuf,
}

impl CliContext {
    /// Access the orchestrator.
    pub const fn orchestrator(&self) -> &SynthesisOrchestrator {
        &self.orchestrator
    }

    /// Everything the orchestrator emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<OrchestratorEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Opens the state store under the data directory
/// 2. Loads the learned performance model (falling back to defaults)
/// 3. Creates the HTTP backend (no request is made yet)
/// 4. Assembles the orchestrator
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let store = Arc::new(FileStateStore::new(config.data_dir.clone()));
    let model = PerformanceModel::load(store, ModelTuning::default()).await;

    let client_config = TtsClientConfig::from_settings(&config.settings);
    let backend = HttpSynthesisBackend::new(&client_config).map_err(CliError::from)?;
    debug!(
        server = %config.settings.server_url,
        data_dir = %config.data_dir.display(),
        "Bootstrapped CLI context"
    );

    let (orchestrator, events) =
        SynthesisOrchestrator::new(Arc::new(backend), model, LoadingTuning::default());

    Ok(CliContext {
        settings: config.settings,
        orchestrator,
        events,
        data_dir: config.data_dir,
    })
}
