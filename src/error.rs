use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Flag or request field that caused the error (e.g., "--text-file", "data.audio")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the offending path)
    pub details: Option<String>,
    /// Source of the error (e.g., "text_source", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the TTS client.
///
/// Variants follow the stages of a synthesis call: input validation and
/// configuration fail before any network traffic, transport errors are the
/// only ones that trigger endpoint fallback, and remote/audio/decode errors
/// come from an otherwise successful HTTP exchange.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error(
        "Network transport error: {message} (endpoint: {endpoint}{}, attempts: {attempts})",
        format_status(.status)
    )]
    Transport {
        message: String,
        endpoint: String,
        status: Option<u16>,
        attempts: usize,
    },

    #[error("MiniMax error: status_code={code}, status_msg={message}{}", format_trace(.trace_id))]
    Remote {
        code: i64,
        message: String,
        trace_id: Option<String>,
    },

    #[error("Response missing data.audio")]
    MissingAudio,

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|s| format!(", HTTP {}", s)).unwrap_or_default()
}

fn format_trace(trace_id: &Option<String>) -> String {
    trace_id
        .as_deref()
        .map(|t| format!(", trace_id={}", t))
        .unwrap_or_default()
}

impl Error {
    /// Create a validation error without context
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::validation_with_context(msg, ErrorContext::new())
    }

    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a configuration error without context
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode {
            message: msg.into(),
        }
    }

    /// True for errors raised before any request was sent.
    pub fn is_pre_flight(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::Configuration { .. })
    }
}
