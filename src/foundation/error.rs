/// Convenience result type used across giftfx.
pub type FxResult<T> = Result<T, FxError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degraded rendering (a sprite that is not decoded yet) is never an error: the
/// particle or frame falls back to a flat primitive instead.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or sampling tweens and timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors raised by a raster surface while drawing.
    #[error("render error: {0}")]
    Render(String),

    /// A resource (raster context, decoded image) could not be acquired.
    #[error("resource unavailable: {0}")]
    Resource(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    /// Build a [`FxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FxError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FxError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FxError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`FxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for failures that abort one invocation but must not stall the scene.
    pub fn is_resource_unavailable(&self) -> bool {
        matches!(self, Self::Resource(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
