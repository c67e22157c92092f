//! Error types for Plugindex
//!
//! This module defines all error types used throughout the crate. Uses
//! `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations.
//!
//! Almost everything in this crate degrades instead of failing: a broken
//! plugin is skipped or listed with empty fields, a failed render falls back
//! to plain text. The variants below cover the few places where an error must
//! reach a caller (config loading, rendering, delivery).

use thiserror::Error;

/// The primary error type for Plugindex operations.
#[derive(Error, Debug)]
pub enum PlugindexError {
    /// Configuration-related errors (invalid config file, bad paths, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rendering errors (font loading, encoding, temp artifact creation)
    #[error("Render error: {0}")]
    Render(String),

    /// Delivery errors reported by an outbound sink
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse errors from plugin metadata documents
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Image encoding/decoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for Plugindex operations.
pub type Result<T> = std::result::Result<T, PlugindexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlugindexError::Config("missing plugins directory".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing plugins directory"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlugindexError = io_err.into();
        assert!(matches!(err, PlugindexError::Io(_)));
    }

    #[test]
    fn test_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [unclosed").unwrap_err();
        let err: PlugindexError = yaml_err.into();
        assert!(matches!(err, PlugindexError::Yaml(_)));
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }

    #[test]
    fn test_render_error_display() {
        let err = PlugindexError::Render("no usable font".to_string());
        assert_eq!(err.to_string(), "Render error: no usable font");
    }
}
