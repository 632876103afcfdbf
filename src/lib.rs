//! # minimax-tts
//!
//! MiniMax 文字转语音（T2A v2）客户端与命令行工具。
//!
//! Text-to-speech client for the MiniMax T2A v2 HTTP API, plus the
//! `minimax-tts` command-line tool built on it.
//!
//! ## Overview
//!
//! A synthesis call is a straight pipeline with no loops:
//!
//! 1. **Validate** the text source and credential before any request
//! 2. **Build** a [`tts::SynthesisRequest`]; unset optional fields are omitted
//! 3. **Transmit** to the primary endpoint, then the backup endpoint on transport failure
//! 4. **Check** `base_resp.status_code` (0 means success)
//! 5. **Extract** `data.audio`: hex (or base64) decode, or download the URL
//! 6. **Persist** to the output path, creating parent directories
//!
//! Any stage failure short-circuits with an [`Error`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minimax_tts::tts::{AudioFormat, SynthesisRequest, TtsClient};
//! use std::path::Path;
//!
//! fn main() -> minimax_tts::Result<()> {
//!     let client = TtsClient::builder()
//!         .api_key("your-api-key")
//!         .timeout_secs(30)
//!         .build()?;
//!
//!     let request = SynthesisRequest::new("Hello there!", "male-qn-qingse")
//!         .with_format(AudioFormat::Wav);
//!     let outcome = client.synthesize_to_file(&request, Path::new("hello.wav"))?;
//!     println!("wrote {} bytes", outcome.bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tts`] | Request/response types, client, decoding, persistence |
//! | [`transport`] | Blocking HTTP with ordered endpoint failover |
//! | [`config`] | Defaults and `MINIMAX_*` environment fallback |
//! | [`report`] | JSON result lines for the CLI |

pub mod config;
pub mod error;
pub mod report;
pub mod transport;
pub mod tts;

pub use error::{Error, ErrorContext};
pub use tts::{SynthesisOutcome, SynthesisRequest, TtsClient, TtsClientBuilder};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
