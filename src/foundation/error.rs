/// Convenience result type used at the crate boundary (config, scene and script loading).
pub type StagehandResult<T> = Result<T, StagehandError>;

/// Boundary error taxonomy.
///
/// The geometry engine itself never fails: out-of-range input is clamped and
/// invalid-state requests are no-ops. These errors only surface when loading or
/// validating documents supplied from outside.
#[derive(thiserror::Error, Debug)]
pub enum StagehandError {
    /// Invalid user-provided configuration or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem errors while reading or writing documents.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StagehandError {
    /// Build a [`StagehandError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StagehandError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`StagehandError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
