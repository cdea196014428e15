// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the body-measurement library.

use std::fmt;

/// Result type alias for measurement operations.
pub type Result<T> = std::result::Result<T, MeasureError>;

/// Main error type for the body-measurement library.
#[derive(Debug)]
pub enum MeasureError {
    /// No live skeleton available at capture commit time.
    Capture(String),
    /// Scale calibration failed (missing front view or degenerate head segment).
    Calibration(String),
    /// Required pose snapshots missing at synthesis time.
    Validation(String),
    /// Persistence collaborator unavailable or rejected a write.
    Persistence(String),
    /// Invalid configuration or recorded-session input.
    Config(String),
    /// Export artifact could not be written.
    Export(String),
    /// Wrapped `std::io::Error`.
    Io(std::io::Error),
    /// Error decoding or encoding captured frame images.
    Image(String),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture(msg) => write!(f, "Capture error: {msg}"),
            Self::Calibration(msg) => write!(f, "Calibration error: {msg}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Persistence(msg) => write!(f, "Persistence error: {msg}"),
            Self::Config(msg) => write!(f, "Config error: {msg}"),
            Self::Export(msg) => write!(f, "Export error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::Image(msg) => write!(f, "Image error: {msg}"),
        }
    }
}

impl std::error::Error for MeasureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MeasureError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for MeasureError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}
