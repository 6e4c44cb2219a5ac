/// Convenience result type used across cubeanim.
pub type CubeAnimResult<T> = Result<T, CubeAnimError>;

/// Top-level error taxonomy used by the render APIs.
#[derive(thiserror::Error, Debug)]
pub enum CubeAnimError {
    /// Invalid job configuration: header fields, colormap, units, colour bounds, output settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid cube data or frame buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rendering or encoding frames.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing job and cube files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CubeAnimError {
    /// Build a [`CubeAnimError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CubeAnimError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CubeAnimError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`CubeAnimError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
