//! Error kinds returned by the translation engine.
//!
//! Every failure is returned to the immediate caller. Translation is
//! deterministic, so nothing here is retryable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// No rule matched a command of the example (or the example has no commands).
    #[error("no rule to translate the example")]
    NoRule,

    /// A rule recognized the command loosely but its strict pattern did not match.
    #[error("cannot match example source to pattern of rule {rule:?}")]
    ExtractionMismatch { rule: &'static str },

    #[error("error parsing duration {value:?}: {reason}")]
    DurationParse { value: String, reason: String },

    #[error("error formatting body: {0}")]
    BodyFormat(#[from] serde_json::Error),

    #[error("error parsing URL params {query:?}: {reason}")]
    QueryParse { query: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TranslateError>;
