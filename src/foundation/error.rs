use std::path::Path;

/// Convenience result type used across datagif.
pub type DatagifResult<T> = Result<T, DatagifError>;

/// Top-level error taxonomy used by the animation APIs.
#[derive(thiserror::Error, Debug)]
pub enum DatagifError {
    /// A referenced column is missing, or its values have the wrong shape.
    #[error("schema error: {0}")]
    Schema(String),

    /// Invalid request: unknown plot kind, mismatched list lengths, bad hook or encoder option.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The charting layer rejected a style argument or the data it was given.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem read/write/delete failure.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatagifError {
    /// Build a [`DatagifError::Schema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`DatagifError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`DatagifError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DatagifError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`DatagifError::Io`] value naming the path the operation touched.
    pub fn io_at(action: &str, path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io(format!("{action} '{}': {err}", path.display()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
