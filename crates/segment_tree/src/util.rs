#[inline(always)]
pub(crate) fn floor_log2_nonzero(x: usize) -> u32 {
    debug_assert!(x > 0);
    usize::BITS - 1 - x.leading_zeros()
}

/// Largest power of two that is `<= x`.
#[inline(always)]
pub(crate) fn floor_pow2_nonzero(x: usize) -> usize {
    1 << floor_log2_nonzero(x)
}

/// Largest power of two dividing `x`.
#[inline(always)]
pub(crate) fn lowest_set_bit(x: usize) -> usize {
    debug_assert!(x > 0);
    x & x.wrapping_neg()
}

/// Shifts a negative index by `capacity`, once.
#[inline(always)]
pub(crate) fn shift_negative(index: isize, capacity: usize) -> isize {
    if index < 0 {
        index + capacity as isize
    } else {
        index
    }
}

#[inline(always)]
pub(crate) fn normalize_index(index: isize, capacity: usize) -> Option<usize> {
    let index = shift_negative(index, capacity);
    (0..capacity as isize)
        .contains(&index)
        .then_some(index as usize)
}

/// Node holding the aligned block `[start, start + interval)`.
#[inline(always)]
pub(crate) fn block_node(capacity: usize, start: usize, interval: usize) -> usize {
    debug_assert!(interval.is_power_of_two());
    debug_assert!(start % interval == 0);
    capacity / interval - 1 + start / interval
}
