//! `SynthesisBackend` port implementation.

use async_trait::async_trait;
use edgespeak_core::{
    BackendError, ServerHealth, SynthesisBackend, SynthesisOutcome, SynthesisRequest, Voice,
};

use crate::client::TtsClient;
use crate::http::HttpBackend;

#[async_trait]
impl<B: HttpBackend> SynthesisBackend for TtsClient<B> {
    async fn list_voices(&self) -> Result<Vec<Voice>, BackendError> {
        Ok(self.fetch_voices().await?)
    }

    async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<SynthesisOutcome, BackendError> {
        Ok(self.request_synthesis(request).await?)
    }

    async fn fetch_audio(&self, audio_id: &str) -> Result<Vec<u8>, BackendError> {
        Ok(self.download_audio(audio_id).await?)
    }

    async fn health(&self) -> Result<ServerHealth, BackendError> {
        Ok(self.check_health().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{Canned, FakeBackend};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    const BASE: &str = "https://example.com/tts";

    fn client(backend: FakeBackend) -> TtsClient<FakeBackend> {
        TtsClient::with_backend(BASE, backend).unwrap()
    }

    #[tokio::test]
    async fn test_list_voices() {
        let backend = FakeBackend::new().with(
            "/tts/api/voices",
            Canned::Json(json!([
                {"ShortName": "en-US-AvaNeural", "Locale": "en-US", "Gender": "Female"},
                {"ShortName": "de-DE-KatjaNeural", "Locale": "de-DE"}
            ])),
        );
        let voices = assert_ok!(SynthesisBackend::list_voices(&client(backend)).await);
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].short_name, "de-DE-KatjaNeural");
    }

    #[tokio::test]
    async fn test_synthesize_posts_request_body() {
        let backend = FakeBackend::new().with(
            "/tts/api/synthesize",
            Canned::Json(json!({
                "audio_id": "abc",
                "file_size": 10,
                "browser_playback_rate": 1.0,
                "synthesis_time": 0.42
            })),
        );
        let client = client(backend);
        let request = SynthesisRequest::new(" Hello ", "en-US-AvaNeural", 1.5).unwrap();

        let outcome = assert_ok!(SynthesisBackend::synthesize(&client, &request).await);
        assert_eq!(outcome.audio_id, "abc");
        assert_eq!(outcome.synthesis_time, Some(0.42));

        let body = client.backend.last_body.lock().unwrap().clone().unwrap();
        assert_eq!(body, json!({"text": "Hello", "voice": "en-US-AvaNeural", "speed": 1.5}));
    }

    #[tokio::test]
    async fn test_synthesis_rejection_surfaces_server_message() {
        let backend = FakeBackend::new().with(
            "/tts/api/synthesize",
            Canned::Status {
                status: 400,
                body: r#"{"error": "Text too long (max 10,000 characters)"}"#.to_string(),
            },
        );
        let request = SynthesisRequest::new("Hello", "en-US-AvaNeural", 1.0).unwrap();
        let err = assert_err!(SynthesisBackend::synthesize(&client(backend), &request).await);
        match err {
            BackendError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("Text too long"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_audio_and_missing_audio() {
        let backend = FakeBackend::new().with("/tts/api/audio/abc", Canned::Bytes(vec![0xff, 0xfb]));
        let client = client(backend);

        let audio = assert_ok!(SynthesisBackend::fetch_audio(&client, "abc").await);
        assert_eq!(audio, vec![0xff, 0xfb]);

        let err = assert_err!(SynthesisBackend::fetch_audio(&client, "gone").await);
        assert!(matches!(err, BackendError::NotFound(_)));

        let requests = client.backend.requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            vec!["GET /tts/api/audio/abc", "GET /tts/api/audio/gone"]
        );
    }

    #[tokio::test]
    async fn test_health() {
        let backend = FakeBackend::new().with(
            "/tts/health",
            Canned::Json(json!({
                "status": "healthy",
                "timestamp": 1_700_000_000.5,
                "temp_files": 2,
                "version": "1.0.0",
                "url_prefix": "/tts"
            })),
        );
        let health = assert_ok!(SynthesisBackend::health(&client(backend)).await);
        assert!(health.is_healthy());
        assert_eq!(health.url_prefix.as_deref(), Some("/tts"));
    }
}
