use thiserror::Error;

/// Errors returned by [`SegmentTree`](crate::SegmentTree) accessors.
///
/// Both variants are contract violations by the caller; the tree is left
/// untouched when one is returned.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentTreeError {
    /// The index is outside `[0, capacity)` after negative adjustment, or it
    /// addresses a leaf that was never populated.
    #[error("index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: isize, capacity: usize },
    /// The range endpoints violate `0 <= start <= stop <= capacity`, or a
    /// step other than 1 was requested.
    #[error("range {start}..{stop} with step {step} not supported for capacity {capacity}")]
    InvalidRange {
        start: isize,
        stop: isize,
        step: isize,
        capacity: usize,
    },
}

pub type Result<T> = std::result::Result<T, SegmentTreeError>;
