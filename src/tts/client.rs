//! TTS (Text-to-Speech) client.

use super::decode::decode_audio;
use super::output::{resolve_output_path, write_audio};
use super::types::{AudioFormat, Model, OutputFormat, SynthesisRequest, SynthesisResponse};
use crate::config;
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Audio returned by a synthesis call, before it is written anywhere.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    /// Endpoint that produced the response (primary or backup).
    pub endpoint: String,
    pub trace_id: Option<String>,
    pub usage_characters: Option<u64>,
}

/// Result of [`TtsClient::synthesize_to_file`].
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub output_path: PathBuf,
    pub bytes: u64,
    pub voice_id: String,
    pub model: Model,
    pub format: AudioFormat,
    pub endpoint: String,
    pub trace_id: Option<String>,
    pub usage_characters: Option<u64>,
}

/// Client for the MiniMax T2A v2 endpoint.
pub struct TtsClient {
    transport: HttpTransport,
}

impl TtsClient {
    pub fn builder() -> TtsClientBuilder {
        TtsClientBuilder::new()
    }

    /// Endpoints in the order they are tried.
    pub fn endpoints(&self) -> &[String] {
        self.transport.endpoints()
    }

    /// Send the request and return decoded (or downloaded) audio.
    pub fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio> {
        if request.text.trim().is_empty() {
            return Err(Error::validation_with_context(
                "Input text is empty.",
                ErrorContext::new()
                    .with_field_path("text")
                    .with_source("tts"),
            ));
        }
        if request.voice_setting.voice_id.trim().is_empty() {
            return Err(Error::validation_with_context(
                "Voice ID is empty.",
                ErrorContext::new()
                    .with_field_path("voice_setting.voice_id")
                    .with_source("tts"),
            ));
        }

        let body = request.to_json_bytes()?;
        let delivery = self.transport.post_json(&body)?;
        let response = SynthesisResponse::from_slice(&delivery.body)?;
        response.check_status()?;

        let audio = response.audio()?;
        let data = match request.output_format {
            OutputFormat::Hex => decode_audio(audio)?,
            OutputFormat::Url => self.transport.download(audio)?,
        };
        debug!(
            endpoint = delivery.endpoint.as_str(),
            bytes = data.len(),
            trace_id = response.trace_id().unwrap_or(""),
            "synthesis response decoded"
        );

        Ok(SynthesizedAudio {
            data,
            trace_id: response.trace_id().map(String::from),
            usage_characters: response.usage_characters(),
            endpoint: delivery.endpoint,
        })
    }

    /// Synthesize and write the audio to `output`. Nothing is written unless
    /// the request, status check and decode all succeeded.
    pub fn synthesize_to_file(
        &self,
        request: &SynthesisRequest,
        output: &Path,
    ) -> Result<SynthesisOutcome> {
        let output_path = resolve_output_path(output)?;
        let audio = self.synthesize(request)?;
        let bytes = write_audio(&output_path, &audio.data)?;
        info!(
            output_path = %output_path.display(),
            bytes,
            endpoint = audio.endpoint.as_str(),
            "audio saved"
        );

        Ok(SynthesisOutcome {
            output_path,
            bytes,
            voice_id: request.voice_setting.voice_id.clone(),
            model: request.model,
            format: request.audio_setting.format,
            endpoint: audio.endpoint,
            trace_id: audio.trace_id,
            usage_characters: audio.usage_characters,
        })
    }
}

pub struct TtsClientBuilder {
    api_key: Option<String>,
    endpoint: Option<String>,
    backup_endpoint: Option<String>,
    use_backup: bool,
    use_env: bool,
    timeout_secs: u64,
}

impl TtsClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            backup_endpoint: None,
            use_backup: true,
            use_env: true,
            timeout_secs: config::DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn maybe_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    pub fn maybe_endpoint(mut self, url: Option<String>) -> Self {
        self.endpoint = url;
        self
    }

    pub fn backup_endpoint(mut self, url: impl Into<String>) -> Self {
        self.backup_endpoint = Some(url.into());
        self
    }

    pub fn maybe_backup_endpoint(mut self, url: Option<String>) -> Self {
        self.backup_endpoint = url;
        self
    }

    /// Only ever try the primary endpoint.
    pub fn without_backup(mut self) -> Self {
        self.use_backup = false;
        self
    }

    /// Ignore `MINIMAX_*` environment variables; only explicit values and
    /// built-in defaults are used.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn build(self) -> Result<TtsClient> {
        let use_env = self.use_env;
        let lookup = move |name: &str| {
            if use_env {
                config::env_lookup(name)
            } else {
                None
            }
        };

        let api_key = config::resolve_api_key(self.api_key, lookup).ok_or_else(|| {
            Error::configuration_with_context(
                format!(
                    "Missing API key. Set {} or pass --api-key.",
                    config::API_KEY_ENV
                ),
                ErrorContext::new()
                    .with_field_path("--api-key")
                    .with_source("client_builder"),
            )
        })?;
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "Timeout must be at least one second",
                ErrorContext::new()
                    .with_field_path("--timeout")
                    .with_source("client_builder"),
            ));
        }

        let primary = config::resolve_endpoint(self.endpoint, lookup);
        let backup = self
            .use_backup
            .then(|| config::resolve_backup_endpoint(self.backup_endpoint, lookup));
        let endpoints = config::endpoint_chain(&primary, backup.as_deref());

        let transport = HttpTransport::new(
            api_key,
            endpoints,
            Duration::from_secs(self.timeout_secs),
        )?;
        Ok(TtsClient { transport })
    }
}

impl Default for TtsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_api_key() {
        let err = TtsClient::builder()
            .without_env()
            .build()
            .err()
            .expect("missing key must fail");
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("Missing API key"));
    }

    #[test]
    fn test_default_endpoint_chain() {
        let client = TtsClient::builder()
            .without_env()
            .api_key("k")
            .build()
            .unwrap();
        assert_eq!(
            client.endpoints(),
            &[
                config::DEFAULT_ENDPOINT.to_string(),
                config::DEFAULT_BACKUP_ENDPOINT.to_string()
            ]
        );
    }

    #[test]
    fn test_backup_equal_to_primary_is_dropped() {
        let client = TtsClient::builder()
            .without_env()
            .api_key("k")
            .endpoint("http://localhost:9/v1/t2a_v2")
            .backup_endpoint("http://localhost:9/v1/t2a_v2")
            .build()
            .unwrap();
        assert_eq!(client.endpoints().len(), 1);

        let single = TtsClient::builder()
            .without_env()
            .api_key("k")
            .without_backup()
            .build()
            .unwrap();
        assert_eq!(single.endpoints(), &[config::DEFAULT_ENDPOINT.to_string()]);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = TtsClient::builder()
            .without_env()
            .api_key("k")
            .timeout_secs(0)
            .build();
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_empty_text_fails_before_network() {
        // Port 9 (discard) is never contacted: validation comes first.
        let client = TtsClient::builder()
            .without_env()
            .api_key("k")
            .endpoint("http://127.0.0.1:9/v1/t2a_v2")
            .without_backup()
            .build()
            .unwrap();
        let err = client
            .synthesize(&SynthesisRequest::new("   ", "voice"))
            .unwrap_err();
        assert!(err.is_pre_flight());
    }
}
