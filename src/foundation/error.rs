/// Convenience result type used across the crate.
pub type LessonResult<T> = Result<T, LessonError>;

/// Top-level error taxonomy.
///
/// None of these ever escape [`crate::render()`]: the rewrite pass is fail-soft and reports
/// problems through [`crate::RenderReport`] instead. Errors surface from configuration loading,
/// authoring commands, registry construction and widget interaction.
#[derive(thiserror::Error, Debug)]
pub enum LessonError {
    /// Invalid user-provided data (config, lesson JSON, authoring input).
    #[error("validation error: {0}")]
    Validation(String),

    /// An embed marker that cannot be built or written back.
    #[error("marker error: {0}")]
    Marker(String),

    /// A widget rejected an interaction.
    #[error("interaction error: {0}")]
    Interaction(String),

    /// Invalid staged-sequence definition.
    #[error("sequence error: {0}")]
    Sequence(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LessonError {
    /// Build a [`LessonError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LessonError::Marker`] value.
    pub fn marker(msg: impl Into<String>) -> Self {
        Self::Marker(msg.into())
    }

    /// Build a [`LessonError::Interaction`] value.
    pub fn interaction(msg: impl Into<String>) -> Self {
        Self::Interaction(msg.into())
    }

    /// Build a [`LessonError::Sequence`] value.
    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence(msg.into())
    }

    /// Build a [`LessonError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
