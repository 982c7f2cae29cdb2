use core::fmt;

use crate::IndexPath;

/// Errors produced while computing a layout or resolving offsets.
///
/// All of these indicate a programming error on the caller's side (a malformed height model or
/// bad configuration). The engine never retries; fix the input and recompute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// `group_count` must be at least 1.
    InvalidGroupCount,
    /// A header or row height was negative or not finite.
    InvalidHeight { index_path: IndexPath, height: f64 },
    /// A layout parameter (viewport, minimum group height, header/footer) was negative or not
    /// finite.
    InvalidParameter { name: &'static str, value: f64 },
    /// The index path does not address an item of the current model.
    IndexPathOutOfRange { index_path: IndexPath },
    /// Externally supplied layout data (a breakpoint table or section tops) breaks an invariant
    /// the query methods rely on.
    MalformedLayout { reason: &'static str },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGroupCount => f.write_str("group count must be at least 1"),
            Self::InvalidHeight { index_path, height } => {
                write!(f, "invalid height {height} for item {index_path}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for `{name}`")
            }
            Self::IndexPathOutOfRange { index_path } => {
                write!(f, "index path {index_path} is out of range")
            }
            Self::MalformedLayout { reason } => write!(f, "malformed layout data: {reason}"),
        }
    }
}

impl core::error::Error for LayoutError {}

pub(crate) fn check_height(index_path: IndexPath, height: f64) -> Result<f64, LayoutError> {
    if height.is_finite() && height >= 0.0 {
        Ok(height)
    } else {
        vwarn!(%index_path, height, "rejecting malformed item height");
        Err(LayoutError::InvalidHeight { index_path, height })
    }
}

pub(crate) fn check_parameter(name: &'static str, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidParameter { name, value })
    }
}
