/// Convenience result type used across courtintro.
pub type IntroResult<T> = Result<T, IntroError>;

/// Top-level error taxonomy used by the animation and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum IntroError {
    /// No drawing surface could be acquired for the requested viewport.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or decoding optional assets (logo, font).
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors raised by a rendering backend or frame sink.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntroError {
    /// Build a [`IntroError::SurfaceUnavailable`] value.
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`IntroError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`IntroError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`IntroError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
