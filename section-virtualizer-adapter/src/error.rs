use core::fmt;

use section_virtualizer::LayoutError;

/// Errors returned by navigation calls on [`crate::ListController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollError {
    /// No scroll surface is attached yet.
    NotInitialized,
    /// A previous `scroll_to` has not settled. Calls are rejected rather than queued.
    ScrollInProgress,
    Layout(LayoutError),
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => f.write_str("list has not been initialized yet"),
            Self::ScrollInProgress => f.write_str("a programmatic scroll is already in progress"),
            Self::Layout(err) => err.fmt(f),
        }
    }
}

impl core::error::Error for ScrollError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::NotInitialized | Self::ScrollInProgress => None,
        }
    }
}

impl From<LayoutError> for ScrollError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}
