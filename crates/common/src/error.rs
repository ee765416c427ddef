//! Common error types.

use thiserror::Error;

/// Main error type for the gallery.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The layout container could not be resolved.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type GalleryResult<T> = Result<T, GalleryError>;

impl GalleryError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Whether this error came from container resolution.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = GalleryError::configuration("Container not found or missing");
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Configuration error: Container not found or missing"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GalleryError = io.into();
        assert!(matches!(err, GalleryError::Io(_)));
        assert!(!err.is_configuration());
    }
}
