//! Array-backed segment tree with point updates and range folds over a
//! caller-supplied associative operation.
//!
//! ```
//! use segment_tree::SegmentTree;
//!
//! let mut tree = SegmentTree::new([1_i64, 2, 3, 4, 5, 6], |a: &i64, b: &i64| *a.max(b));
//! assert_eq!(tree.query(2, 6), Ok(6));
//! tree.set(0, 7).unwrap();
//! assert_eq!(tree.query(0, 6), Ok(7));
//! assert_eq!(tree.to_string(), "[7, 2, 3, 4, 5, 6]");
//! ```

mod error;
mod segment_tree;
mod util;

pub use error::{Result, SegmentTreeError};
pub use segment_tree::SegmentTree;
