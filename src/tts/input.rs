//! Text-source selection and validation.

use crate::{Error, ErrorContext, Result};
use std::fs;
use std::path::PathBuf;

/// Where the text to synthesize comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    Inline(String),
    File(PathBuf),
}

impl TextSource {
    /// Exactly one of `text` / `text_file` must be given.
    pub fn from_args(text: Option<String>, text_file: Option<PathBuf>) -> Result<Self> {
        match (text, text_file) {
            (Some(text), None) => Ok(Self::Inline(text)),
            (None, Some(path)) => Ok(Self::File(path)),
            _ => Err(Error::validation_with_context(
                "Provide exactly one of --text or --text-file.",
                ErrorContext::new()
                    .with_field_path("--text/--text-file")
                    .with_source("text_source"),
            )),
        }
    }

    /// Load and trim the text; empty results are rejected.
    pub fn resolve(&self) -> Result<String> {
        let raw = match self {
            Self::Inline(text) => text.clone(),
            Self::File(path) => fs::read_to_string(path).map_err(|e| {
                Error::validation_with_context(
                    format!("Cannot read text file: {}", e),
                    ErrorContext::new()
                        .with_field_path("--text-file")
                        .with_details(path.display().to_string())
                        .with_source("text_source"),
                )
            })?,
        };
        let text = raw.trim();
        if text.is_empty() {
            return Err(Error::validation_with_context(
                "Input text is empty.",
                ErrorContext::new().with_source("text_source"),
            ));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source_requires_exactly_one() {
        assert!(TextSource::from_args(None, None).is_err());
        assert!(TextSource::from_args(Some("a".into()), Some("b.txt".into())).is_err());
        assert_eq!(
            TextSource::from_args(Some("a".into()), None).unwrap(),
            TextSource::Inline("a".into())
        );
    }

    #[test]
    fn test_text_source_trims_and_rejects_empty() {
        assert_eq!(TextSource::Inline("  hi \n".into()).resolve().unwrap(), "hi");
        let err = TextSource::Inline(" \t\n ".into()).resolve().unwrap_err();
        assert!(err.to_string().contains("Input text is empty."));
    }

    #[test]
    fn test_text_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "\n  从文件读取  \n").unwrap();
        assert_eq!(TextSource::File(path).resolve().unwrap(), "从文件读取");

        let missing = TextSource::File(dir.path().join("missing.txt"));
        assert!(matches!(missing.resolve(), Err(Error::Validation { .. })));
    }
}
