//! JSON result lines printed by the command-line tool.

use crate::tts::SynthesisOutcome;
use serde::Serialize;

/// Printed to stdout on success.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessReport {
    pub ok: bool,
    pub output_path: String,
    pub voice_id: String,
    pub model: String,
    pub format: String,
    pub bytes: u64,
    pub trace_id: Option<String>,
    pub usage_characters: Option<u64>,
}

impl From<&SynthesisOutcome> for SuccessReport {
    fn from(outcome: &SynthesisOutcome) -> Self {
        Self {
            ok: true,
            output_path: outcome.output_path.display().to_string(),
            voice_id: outcome.voice_id.clone(),
            model: outcome.model.to_string(),
            format: outcome.format.to_string(),
            bytes: outcome.bytes,
            trace_id: outcome.trace_id.clone(),
            usage_characters: outcome.usage_characters,
        }
    }
}

/// Printed to stderr on any failure.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub ok: bool,
    pub error: String,
}

impl FailureReport {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// Render as a single JSON line.
pub fn to_json_line<T: Serialize>(report: &T) -> String {
    serde_json::to_string(report)
        .unwrap_or_else(|e| format!(r#"{{"ok":false,"error":"report serialization failed: {}"}}"#, e))
}
