use std::fmt;

use jpsnav_core::Point;

use crate::fibheap::HeapError;

/// Errors reported by [`NavMap`](crate::NavMap) operations.
///
/// "No path" is not an error: queries return `Ok(None)` for unreachable
/// goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// Map dimensions must both be positive.
    InvalidSize { width: i32, height: i32 },
    /// A coordinate lies outside the map.
    OutOfBounds(Point),
    /// The query starts on an obstacle.
    BlockedStart(Point),
    /// The query ends on an obstacle.
    BlockedEnd(Point),
    /// The open set misbehaved; indicates a logic error.
    Heap(HeapError),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "invalid map size {width}x{height}")
            }
            Self::OutOfBounds(p) => write!(f, "position {p} is out of map"),
            Self::BlockedStart(p) => write!(f, "start position {p} is blocked"),
            Self::BlockedEnd(p) => write!(f, "end position {p} is blocked"),
            Self::Heap(e) => write!(f, "open set: {e}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Heap(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HeapError> for NavError {
    fn from(e: HeapError) -> Self {
        Self::Heap(e)
    }
}
