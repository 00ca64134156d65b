//! URL construction for the TTS server API.
//!
//! The server may be mounted under a path prefix (`https://host/tts`), so
//! every endpoint is resolved relative to the base path rather than the
//! host root.

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Resolved API endpoints for one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parse `base_url`, keeping any path prefix.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let mut base = Url::parse(base_url.trim())?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        // Relative joins replace the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    pub const fn base(&self) -> &Url {
        &self.base
    }

    pub fn voices(&self) -> ClientResult<Url> {
        Ok(self.base.join("api/voices")?)
    }

    pub fn synthesize(&self) -> ClientResult<Url> {
        Ok(self.base.join("api/synthesize")?)
    }

    /// Audio download URL; the id is percent-encoded as one path segment.
    pub fn audio(&self, audio_id: &str) -> ClientResult<Url> {
        let mut url = self.base.join("api/audio/")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(audio_id);
        Ok(url)
    }

    pub fn health(&self) -> ClientResult<Url> {
        Ok(self.base.join("health")?)
    }
}
