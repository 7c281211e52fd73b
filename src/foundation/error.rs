/// Convenience result type used across animclock.
pub type AnimatorResult<T> = Result<T, AnimatorError>;

/// Top-level error taxonomy used by clock, image and capture APIs.
#[derive(thiserror::Error, Debug)]
pub enum AnimatorError {
    /// The image handle could not report its frame count or could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The image handle rejected a frame-selection request.
    #[error("image selection error: {0}")]
    ImageSelection(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimatorError {
    /// Build an [`AnimatorError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build an [`AnimatorError::ImageSelection`] value.
    pub fn image_selection(msg: impl Into<String>) -> Self {
        Self::ImageSelection(msg.into())
    }

    /// Build an [`AnimatorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether retrying the failed operation later can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ImageSelection(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
