/// Convenience result type used across the crate.
pub type WobbleResult<T> = Result<T, WobbleError>;

/// Top-level error taxonomy.
///
/// Geometry itself never fails: text that does not match the coordinate grammar passes through
/// untouched. Errors come from the surfaces around it (config, documents, scheduling).
#[derive(thiserror::Error, Debug)]
pub enum WobbleError {
    /// Invalid wobble configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A drawing or SVG document could not be read or addressed.
    #[error("document error: {0}")]
    Document(String),

    /// A scheduled task referenced state that does not exist.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WobbleError {
    /// Build a [`WobbleError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`WobbleError::Document`] value.
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    /// Build a [`WobbleError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
