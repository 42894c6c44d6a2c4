//! Error types for the stencil engine.
//!
//! Nothing here is fatal to a running game: stroke-level outcomes are
//! reported through [`crate::api::types::StrokeOutcome`], not errors.

use thiserror::Error;

/// Error type for engine setup and data loading.
#[derive(Debug, Error)]
pub enum StencilError {
    /// A word contains a letter that has no template.
    #[error("no template for letter '{0}'")]
    UndefinedGlyph(char),

    /// A word with no letters was requested.
    #[error("word is empty")]
    EmptyWord,

    /// A template loaded from data violates a stroke invariant.
    #[error("invalid template for '{letter}': {reason}")]
    InvalidTemplate { letter: char, reason: String },

    /// The word list has no usable words after filtering.
    #[error("word list is empty after filtering undefined letters")]
    EmptyWordList,

    /// Config, template or word-list JSON failed to parse.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StencilError>;
