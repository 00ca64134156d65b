//! Client for the TTS server REST API.

use edgespeak_core::{ServerHealth, SynthesisOutcome, SynthesisRequest, Voice};
use tracing::debug;

use crate::config::TtsClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::Endpoints;

/// Production client using the reqwest HTTP backend.
pub type HttpSynthesisBackend = TtsClient<ReqwestBackend>;

/// Client generic over its HTTP backend so tests can inject a fake one.
///
/// External code should use [`HttpSynthesisBackend`] through the
/// `SynthesisBackend` port.
pub struct TtsClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) endpoints: Endpoints,
}

impl HttpSynthesisBackend {
    /// Create a client for the server in `config`.
    pub fn new(config: &TtsClientConfig) -> ClientResult<Self> {
        Ok(Self {
            backend: ReqwestBackend::new(config)?,
            endpoints: Endpoints::new(&config.base_url)?,
        })
    }
}

impl<B: HttpBackend> TtsClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> ClientResult<Self> {
        Ok(Self {
            backend,
            endpoints: Endpoints::new(base_url)?,
        })
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) async fn fetch_voices(&self) -> ClientResult<Vec<Voice>> {
        let voices: Vec<Voice> = self.backend.get_json(&self.endpoints.voices()?).await?;
        debug!(count = voices.len(), "Loaded voices");
        Ok(voices)
    }

    pub(crate) async fn request_synthesis(
        &self,
        request: &SynthesisRequest,
    ) -> ClientResult<SynthesisOutcome> {
        let url = self.endpoints.synthesize()?;
        debug!(%url, text_length = request.char_count(), "Requesting synthesis");
        let outcome: SynthesisOutcome = self.backend.post_json(&url, request).await?;
        debug!(
            audio_id = %outcome.audio_id,
            synthesis_time = ?outcome.synthesis_time,
            "Synthesis finished"
        );
        Ok(outcome)
    }

    pub(crate) async fn download_audio(&self, audio_id: &str) -> ClientResult<Vec<u8>> {
        self.backend.get_bytes(&self.endpoints.audio(audio_id)?).await
    }

    pub(crate) async fn check_health(&self) -> ClientResult<ServerHealth> {
        self.backend.get_json(&self.endpoints.health()?).await
    }
}
