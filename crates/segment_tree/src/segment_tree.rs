use std::fmt;
use std::ops::{Bound, RangeBounds};

use log::{debug, trace};

use crate::error::{Result, SegmentTreeError};
use crate::util::{block_node, floor_pow2_nonzero, lowest_set_bit, normalize_index, shift_negative};

/// `combine` lifted over `Option`, with `None` as a two-sided identity.
#[inline(always)]
fn combine_or_none<T, F>(combine: &F, left: Option<&T>, right: Option<&T>) -> Option<T>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    match (left, right) {
        (Some(l), Some(r)) => Some(combine(l, r)),
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (None, None) => None,
    }
}

/// Fixed-capacity segment tree over a caller-supplied associative operation.
///
/// The tree is stored as a flat array of `2 * capacity - 1` slots: the
/// children of node `i` live at `2i + 1` and `2i + 2`, and logical element
/// `k` lives in leaf `capacity - 1 + k`. Slots that cover no element are
/// empty and act as the identity of `combine`, so `combine` itself only ever
/// sees present values, always with the left range as its first argument.
///
/// Indices are `isize`; a negative index counts back from `capacity`.
///
/// Mutation goes through `&mut self`. Sharing one tree between threads needs
/// an external lock.
#[derive(Clone)]
pub struct SegmentTree<T, F> {
    capacity: usize,
    storage: Vec<Option<T>>,
    combine: F,
}

impl<T, F> SegmentTree<T, F> {
    /// Number of leaves, the smallest power of two holding the initial elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the element at `index`.
    ///
    /// Fails with [`SegmentTreeError::IndexOutOfRange`] when `index` is outside
    /// `[0, capacity)` after negative adjustment, or when the leaf was never
    /// populated.
    pub fn get(&self, index: isize) -> Result<&T> {
        normalize_index(index, self.capacity)
            .and_then(|k| self.storage[self.leaf(k)].as_ref())
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Populated leaves in logical order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.storage[self.capacity - 1..].iter().flatten()
    }

    /// Fold of every populated leaf, or `None` when the tree holds nothing.
    pub fn total(&self) -> Option<&T> {
        self.storage[0].as_ref()
    }

    #[inline(always)]
    fn leaf(&self, k: usize) -> usize {
        self.capacity - 1 + k
    }

    fn out_of_range(&self, index: isize) -> SegmentTreeError {
        debug!("index {index} rejected (capacity {})", self.capacity);
        SegmentTreeError::IndexOutOfRange {
            index,
            capacity: self.capacity,
        }
    }
}

impl<T, F> SegmentTree<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Builds a tree over `elements` in `O(capacity)`.
    ///
    /// An empty input yields a tree of capacity 1 with nothing populated.
    pub fn new<I>(elements: I, combine: F) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let elements = elements.into_iter().collect::<Vec<_>>();
        let len = elements.len();
        let capacity = len.next_power_of_two();
        let size = 2 * capacity - 1;

        let mut storage = Vec::with_capacity(size);
        storage.resize_with(capacity - 1, || None);
        storage.extend(elements.into_iter().map(Some));
        storage.resize_with(size, || None);

        let mut tree = Self {
            capacity,
            storage,
            combine,
        };
        for node in (0..capacity - 1).rev() {
            tree.pull(node);
        }
        trace!("built segment tree: len={len} capacity={capacity}");
        tree
    }

    /// Replaces the element at `index` and recomputes every ancestor up to
    /// the root in `O(log capacity)`.
    ///
    /// Writing into a padding leaf populates it.
    pub fn set(&mut self, index: isize, value: T) -> Result<()> {
        let Some(k) = normalize_index(index, self.capacity) else {
            return Err(self.out_of_range(index));
        };

        let mut node = self.leaf(k);
        trace!("set index {k} (leaf {node})");
        self.storage[node] = Some(value);
        while node > 0 {
            node = (node - 1) / 2;
            self.pull(node);
        }
        Ok(())
    }

    /// Folds the half-open range `[start, stop)` left to right.
    ///
    /// Both endpoints may be negative and are adjusted by `capacity` once.
    /// When `start == stop` the element at `start` is returned instead of an
    /// empty fold, so `query(i, i)` behaves like `get(i)` and
    /// `query(capacity, capacity)` is [`SegmentTreeError::IndexOutOfRange`].
    ///
    /// A range covering only unpopulated leaves is also `IndexOutOfRange`.
    pub fn query(&self, start: isize, stop: isize) -> Result<T> {
        self.fold_span(start, stop, 1)
    }

    /// [`query`](Self::query) with slice-style bounds: `..` spans the whole
    /// capacity, and inclusive ends are adjusted after negative indexing.
    pub fn query_range<R>(&self, range: R) -> Result<T>
    where
        R: RangeBounds<isize>,
    {
        self.query_step_by(range, 1)
    }

    /// Like [`query_range`](Self::query_range), but rejects any `step` other
    /// than 1 with [`SegmentTreeError::InvalidRange`].
    pub fn query_step_by<R>(&self, range: R, step: isize) -> Result<T>
    where
        R: RangeBounds<isize>,
    {
        let (start, stop) = self.resolve_bounds(&range);
        self.fold_span(start, stop, step)
    }

    fn resolve_bounds<R>(&self, range: &R) -> (isize, isize)
    where
        R: RangeBounds<isize>,
    {
        // left untouched when still negative so the later shift rejects it
        let one_past = |x: isize| match shift_negative(x, self.capacity) {
            shifted if shifted < 0 => x,
            shifted => shifted.saturating_add(1),
        };
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => one_past(s),
            Bound::Unbounded => 0,
        };
        let stop = match range.end_bound() {
            Bound::Included(&e) => one_past(e),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.capacity as isize,
        };
        (start, stop)
    }

    fn fold_span(&self, start: isize, stop: isize, step: isize) -> Result<T> {
        let capacity = self.capacity as isize;
        let start = shift_negative(start, self.capacity);
        let stop = shift_negative(stop, self.capacity);
        if step != 1
            || start < 0
            || stop < 0
            || start > capacity
            || stop > capacity
            || start > stop
        {
            debug!("range {start}..{stop} step {step} rejected (capacity {capacity})");
            return Err(SegmentTreeError::InvalidRange {
                start,
                stop,
                step,
                capacity: self.capacity,
            });
        }

        if start == stop {
            return self.get(start).cloned();
        }

        let (mut lo, hi) = (start as usize, stop as usize);
        let mut acc: Option<T> = None;
        while lo < hi {
            let max_interval = if lo == 0 {
                self.capacity
            } else {
                lowest_set_bit(lo)
            };
            let interval = floor_pow2_nonzero((hi - lo).min(max_interval));
            let block = self.storage[block_node(self.capacity, lo, interval)].as_ref();
            acc = match (acc, block) {
                (Some(running), Some(block)) => Some((self.combine)(&running, block)),
                (None, Some(block)) => Some(block.clone()),
                (running, None) => running,
            };
            lo += interval;
        }

        acc.ok_or_else(|| self.out_of_range(start))
    }

    fn pull(&mut self, node: usize) {
        debug_assert!(node < self.capacity - 1);
        let value = combine_or_none(
            &self.combine,
            self.storage[2 * node + 1].as_ref(),
            self.storage[2 * node + 2].as_ref(),
        );
        self.storage[node] = value;
    }
}

impl<T: fmt::Display, F> fmt::Display for SegmentTree<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug, F> fmt::Debug for SegmentTree<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("capacity", &self.capacity)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
