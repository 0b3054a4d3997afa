/// Convenience result type used across the crate.
pub type DesignResult<T> = Result<T, DesignError>;

/// Top-level error taxonomy used by the engine APIs.
///
/// Every failure is non-fatal: callers are expected to surface the error,
/// keep the current [`crate::CompositionState`] intact and stay interactive.
#[derive(thiserror::Error, Debug)]
pub enum DesignError {
    /// The raw input text was empty (after trimming); no adapter call is made.
    #[error("input error: text is empty")]
    EmptyInput,

    /// The summarization adapter failed. All adapter-side errors collapse
    /// into this single condition; no structured codes cross the boundary.
    #[error("summarization error: {0}")]
    Summarization(String),

    /// A template id string outside the fixed template set.
    #[error("unknown template id '{0}'")]
    UnknownTemplate(String),

    /// Invalid user-provided data (malformed data URI, bad font path, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors from the export pipeline.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DesignError {
    /// Build a [`DesignError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DesignError::Summarization`] value.
    pub fn summarization(msg: impl Into<String>) -> Self {
        Self::Summarization(msg.into())
    }
}

/// Failures of the export pipeline.
///
/// Export never retries automatically; the caller may retry manually.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// No visual tree has been rendered yet (generation never completed).
    #[error("no rendered content to export")]
    NoRenderedContent,

    /// The rasterization capability rejected the input.
    #[error("rasterization failed: {0}")]
    Rasterization(String),

    /// The encoded image could not be written to disk.
    #[error("could not save exported file: {0}")]
    Save(String),
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
