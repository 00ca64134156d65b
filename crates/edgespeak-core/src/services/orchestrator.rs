//! Synthesis orchestrator - drives one request end to end.
//!
//! Owns the performance model (its only writer), the estimation engine and
//! the loading controller. Requests are serialized by `&mut self`: at most
//! one synthesis is in flight and a new one waits for the previous loading
//! session to finish tearing down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{Notification, SynthesisRequest, VoiceCatalog};
use crate::estimate::{Estimate, EstimationEngine};
use crate::events::OrchestratorEvent;
use crate::loading::{LoadingController, LoadingView};
use crate::perf::{PerformanceModel, PerformanceSample, PerformanceState};
use crate::ports::{CoreError, ServerHealth, SynthesisBackend, SynthesisOutcome};
use crate::tuning::LoadingTuning;

/// A completed synthesis.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub outcome: SynthesisOutcome,
    /// MP3 bytes.
    pub audio: Vec<u8>,
    /// The prediction shown while waiting.
    pub estimate: Estimate,
    /// Client-measured time until the backend answered.
    pub elapsed: Duration,
}

/// Service for synthesis operations.
pub struct SynthesisOrchestrator {
    backend: Arc<dyn SynthesisBackend>,
    model: PerformanceModel,
    engine: EstimationEngine,
    loading: LoadingController,
    events: mpsc::UnboundedSender<OrchestratorEvent>,
}

impl SynthesisOrchestrator {
    /// Create an orchestrator and the receiver for its events.
    pub fn new(
        backend: Arc<dyn SynthesisBackend>,
        model: PerformanceModel,
        loading_tuning: LoadingTuning,
    ) -> (Self, mpsc::UnboundedReceiver<OrchestratorEvent>) {
        let engine = EstimationEngine::new(model.tuning().clone());
        let loading = LoadingController::new(engine.clone(), loading_tuning);
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                backend,
                model,
                engine,
                loading,
                events,
            },
            rx,
        )
    }

    /// Observe the loading indicator.
    pub fn loading_view(&self) -> watch::Receiver<LoadingView> {
        self.loading.subscribe()
    }

    pub const fn loading(&self) -> &LoadingController {
        &self.loading
    }

    /// Read-only snapshot of what the model has learned.
    pub const fn performance(&self) -> &PerformanceState {
        self.model.state()
    }

    /// Predict how long `request` would take, without issuing it.
    pub fn estimate(&self, request: &SynthesisRequest) -> Estimate {
        self.engine
            .estimate(self.model.state(), &request.estimate_request())
    }

    /// Validate raw input and synthesize it.
    ///
    /// Validation failures are reported as an error notification too.
    pub async fn speak(
        &mut self,
        text: &str,
        voice: &str,
        speed: f64,
    ) -> Result<SynthesisResult, CoreError> {
        let request = match SynthesisRequest::new(text, voice, speed) {
            Ok(request) => request,
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };
        self.synthesize(&request).await
    }

    /// Synthesize `request`, driving the loading indicator and learning from
    /// the observed timing.
    pub async fn synthesize(
        &mut self,
        request: &SynthesisRequest,
    ) -> Result<SynthesisResult, CoreError> {
        self.loading.settled().await;

        let estimate = self
            .loading
            .begin(self.model.state(), &request.estimate_request())?;
        self.emit(OrchestratorEvent::SynthesisStarted {
            estimate,
            text_length: request.char_count(),
        });
        debug!(
            text_length = request.char_count(),
            voice = %request.voice(),
            speed = request.speed(),
            center = estimate.center,
            "Synthesis started"
        );

        let started = Instant::now();
        let result = self.backend.synthesize(request).await;
        let elapsed = started.elapsed();

        let outcome = match result {
            Ok(outcome) => {
                let sample = PerformanceSample::new(
                    request.char_count(),
                    elapsed,
                    outcome.synthesis_time,
                    request.voice(),
                    request.speed(),
                );
                if let Err(e) = self.model.record(sample).await {
                    warn!(error = %e, "Failed to persist performance data");
                }
                self.loading.end();
                self.emit(OrchestratorEvent::SynthesisFinished {
                    elapsed,
                    success: true,
                });
                outcome
            }
            Err(e) => {
                self.loading.end();
                self.emit(OrchestratorEvent::SynthesisFinished {
                    elapsed,
                    success: false,
                });
                warn!(error = %e, ?elapsed, "Synthesis failed");
                self.notify(Notification::error(format!("Speech synthesis failed: {e}")));
                return Err(e.into());
            }
        };

        let audio = match self.backend.fetch_audio(&outcome.audio_id).await {
            Ok(audio) => audio,
            Err(e) => {
                warn!(audio_id = %outcome.audio_id, error = %e, "Audio download failed");
                self.notify(Notification::error(format!("Audio setup failed: {e}")));
                return Err(e.into());
            }
        };

        if outcome.needs_player_acceleration() {
            self.notify(Notification::info(format!(
                "Speed {}x: Edge-TTS + Browser acceleration",
                request.speed()
            )));
        } else {
            self.notify(Notification::success("Speech generated successfully!"));
        }
        info!(
            audio_id = %outcome.audio_id,
            bytes = audio.len(),
            ?elapsed,
            "Synthesis complete"
        );

        Ok(SynthesisResult {
            outcome,
            audio,
            estimate,
            elapsed,
        })
    }

    /// Fetch the voice list.
    pub async fn voices(&self) -> Result<VoiceCatalog, CoreError> {
        match self.backend.list_voices().await {
            Ok(voices) => Ok(VoiceCatalog::new(voices)),
            Err(e) => {
                self.notify(Notification::error(format!("Failed to load voices: {e}")));
                Err(e.into())
            }
        }
    }

    pub async fn health(&self) -> Result<ServerHealth, CoreError> {
        Ok(self.backend.health().await?)
    }

    /// Forget learned performance data.
    pub async fn reset_performance(&mut self) -> Result<(), CoreError> {
        self.model.reset().await?;
        self.notify(Notification::info("Performance data reset"));
        Ok(())
    }

    fn notify(&self, notification: Notification) {
        self.emit(OrchestratorEvent::Notification(notification));
    }

    fn emit(&self, event: OrchestratorEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}
