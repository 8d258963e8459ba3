//! Error types for the equation layout crate

use thiserror::Error;

/// Errors that can occur while splitting or laying out equations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The equation string has no `=` to anchor on
    #[error("Malformed equation spec (no '=' anchor): {0:?}")]
    MalformedSpec(String),

    /// A per-row list is shorter than the number of rows it must cover
    #[error("Index {index} out of range for per-row list of length {len}")]
    IndexMismatch { index: usize, len: usize },

    /// Font size must be finite and positive
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f32),

    /// Stored parts are not `[lhs, anchor, fragment..]`
    #[error("Malformed equation parts: {0}")]
    MalformedParts(String),

    /// A configuration value is out of range
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
