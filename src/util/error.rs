//! Error types for the scidata library.

use thiserror::Error;

/// Main error type for axis, request and field operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // === Construction ===

    /// Axis parameters that cannot describe a coordinate sequence
    #[error("Invalid axis '{axis}': {reason}")]
    InvalidAxis { axis: String, reason: String },

    /// Explicit coordinates are not strictly monotonic
    #[error("Axis '{axis}' is not strictly monotonic at index {index}")]
    NonMonotonic { axis: String, index: usize },

    /// Axis length is not divisible by the declared period
    #[error(
        "Axis '{axis}' of length {length} cannot hold {period_count} {kind}",
        kind = period_word(.is_antiperiod)
    )]
    Periodicity {
        axis: String,
        length: usize,
        period_count: usize,
        is_antiperiod: bool,
    },

    /// Pattern indices inconsistent with the unique/whole values
    #[error("Invalid pattern on axis '{axis}': {reason}")]
    PatternIndex { axis: String, reason: String },

    // === Requests ===

    /// Request string does not follow the grammar
    #[error("Cannot parse request '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Requested axis is not associated with the field
    #[error("Axis not found: {0}")]
    AxisNotFound(String),

    /// Modifier not applicable to the axis kind
    #[error("Modifier '{modifier}' is not supported by axis '{axis}'")]
    UnsupportedModifier { axis: String, modifier: String },

    /// Arbitrary target coordinates requested on an axis without resampling
    #[error("Axis '{0}' does not support resampling onto arbitrary coordinates")]
    UnsupportedResampling(String),

    /// `axis=axis_data` request without a matching target array
    #[error("No target coordinates supplied for axis '{0}'")]
    MissingAxisData(String),

    /// Range selection matched no coordinate
    #[error("Range [{lower}, {upper}) selects no coordinate on axis '{axis}'")]
    EmptySelection { axis: String, lower: f64, upper: f64 },

    // === Shapes ===

    /// Stored values do not match the axes' stored lengths
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    /// Reconstruction produced a length other than the declared one
    #[error("Axis '{axis}' reconstructed {actual} samples, declared {expected}")]
    LengthMismatch { axis: String, expected: usize, actual: usize },
}

impl Error {
    /// Create an invalid axis error.
    pub fn invalid_axis(axis: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAxis { axis: axis.into(), reason: reason.into() }
    }

    /// Create a pattern index error.
    pub fn pattern(axis: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PatternIndex { axis: axis.into(), reason: reason.into() }
    }

    /// Create a parse error.
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse { input: input.into(), reason: reason.into() }
    }

    /// True for errors raised while building axes or fields.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::InvalidAxis { .. }
                | Self::NonMonotonic { .. }
                | Self::Periodicity { .. }
                | Self::PatternIndex { .. }
        )
    }

    /// True for errors caused by a malformed or unsupported request.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. }
                | Self::AxisNotFound(_)
                | Self::UnsupportedModifier { .. }
                | Self::UnsupportedResampling(_)
                | Self::MissingAxisData(_)
                | Self::EmptySelection { .. }
        )
    }
}

fn period_word(is_antiperiod: &bool) -> &'static str {
    if *is_antiperiod { "anti-periods" } else { "periods" }
}

/// Result type alias for scidata operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::Periodicity {
            axis: "time".into(),
            length: 10,
            period_count: 3,
            is_antiperiod: false,
        };
        let msg = e.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("3 periods"));

        let e = Error::Periodicity {
            axis: "angle".into(),
            length: 16,
            period_count: 3,
            is_antiperiod: true,
        };
        assert!(e.to_string().contains("anti-periods"));
    }

    #[test]
    fn test_error_classes() {
        assert!(Error::pattern("slice", "bad").is_construction());
        assert!(Error::AxisNotFound("x".into()).is_request());
        let shape = Error::ShapeMismatch { expected: "[2]".into(), actual: "[3]".into() };
        assert!(!shape.is_construction());
        assert!(!shape.is_request());
    }
}
