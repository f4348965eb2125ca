//! Error types for funcplot.
//!
//! Everything fallible in the crate returns [`Result`], whose error side is
//! [`PlotError`]. Validation and export failures have their own enums so the
//! UI can turn them into distinct user messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::data::params::ParameterField;

/// Result type alias for funcplot operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur in funcplot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The settings file exists but does not contain a readable configuration.
    #[error("Failed to parse configuration file: {path}")]
    ConfigurationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The settings file could not be read or written.
    #[error("Failed to access configuration file: {path}")]
    ConfigurationIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parameters were rejected before saving.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing the vector image failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Sampling needs at least two points to define a step.
    #[error("Resolution must be at least 2 samples, got {0}")]
    InvalidResolution(usize),

    /// A function name that does not map onto any [`FunctionKind`](crate::FunctionKind).
    #[error("Unsupported function type: {0}")]
    UnsupportedFunctionKind(String),
}

impl PlotError {
    /// Create a ConfigurationIo error.
    pub fn configuration_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigurationIo {
            path: path.into(),
            source,
        }
    }

    /// Create a ConfigurationParse error.
    pub fn configuration_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigurationParse {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a parameter set may not be saved. See [`crate::validate`] for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Function Parameters are not valid!")]
    Missing,
    /// NaN or infinite values cannot be written to the settings file.
    #[error("{0} must be a finite number!")]
    NotFinite(ParameterField),
    #[error("Amplitude must not be smaller than 0!")]
    NegativeAmplitude,
    #[error("Frequency must not be smaller than 0!")]
    NegativeFrequency,
    #[error("Phase must not be smaller than 0!")]
    NegativePhase,
    #[error("X-Min must be smaller than X-Max!")]
    EmptyRange,
}

/// Failures while writing an exported plot.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("You do not have permission to write to the selected location: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("An unexpected error occurred, check if there is enough space on your hard drive: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Classify an I/O failure for `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Short dialog caption for this failure.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "Access Denied",
            Self::Io { .. } => "Error",
        }
    }
}
