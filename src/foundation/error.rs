//! Error type shared by the crate.

/// Library result alias.
pub type GameNightResult<T> = Result<T, GameNightError>;

/// Infrastructure failures.
///
/// Domain conditions (invalid moment, unloaded layer, malformed color) never surface here; they
/// degrade the rendered card instead.
#[derive(thiserror::Error, Debug)]
pub enum GameNightError {
    /// Input rejected at a construction boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset bytes could not be read, decoded or resolved.
    #[error("asset error: {0}")]
    Asset(String),

    /// Backend failed to rasterize or encode a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Configuration could not be parsed or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped error with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GameNightError {
    /// Build a [`GameNightError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GameNightError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`GameNightError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GameNightError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
