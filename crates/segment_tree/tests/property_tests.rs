//! Property tests for `SegmentTree` against a plain-slice oracle.

use proptest::prelude::*;
use segment_tree::{SegmentTree, SegmentTreeError};

fn sum(a: &i64, b: &i64) -> i64 {
    a + b
}

fn concat(a: &String, b: &String) -> String {
    format!("{a}{b}")
}

fn fold_slice<T: Clone>(values: &[T], combine: impl Fn(&T, &T) -> T) -> T {
    let (first, rest) = values.split_first().expect("non-empty slice");
    rest.iter().fold(first.clone(), |acc, x| combine(&acc, x))
}

fn strategy_values() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_i64..1_000, 1..64)
}

fn strategy_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{0,3}", 1..24)
}

/// Values plus a list of `(index, value)` updates addressing them.
fn strategy_values_with_updates() -> impl Strategy<Value = (Vec<i64>, Vec<(usize, i64)>)> {
    strategy_values().prop_flat_map(|values| {
        let n = values.len();
        let updates = prop::collection::vec((0..n, -1_000_i64..1_000), 0..32);
        (Just(values), updates)
    })
}

proptest! {
    // every range fold equals the left-to-right fold of its elements
    #[test]
    fn prop_query_matches_fold(values in strategy_values()) {
        let tree = SegmentTree::new(values.clone(), sum);
        let n = values.len();
        for l in 0..n {
            for r in (l + 1)..=n {
                prop_assert_eq!(tree.query(l as isize, r as isize), Ok(fold_slice(&values[l..r], sum)));
            }
        }
    }

    // non-commutative combine keeps operand order
    #[test]
    fn prop_concat_keeps_order(words in strategy_words()) {
        let tree = SegmentTree::new(words.clone(), concat);
        let n = words.len();
        for l in 0..n {
            for r in (l + 1)..=n {
                prop_assert_eq!(tree.query(l as isize, r as isize), Ok(words[l..r].concat()));
            }
        }
    }

    // set then get returns the written value, and folds track every update
    #[test]
    fn prop_updates_roundtrip((mut values, updates) in strategy_values_with_updates()) {
        let mut tree = SegmentTree::new(values.clone(), sum);
        for (i, v) in updates {
            tree.set(i as isize, v).unwrap();
            values[i] = v;
            prop_assert_eq!(tree.get(i as isize), Ok(&v));
        }
        let n = values.len();
        prop_assert_eq!(tree.query(0, n as isize), Ok(values.iter().sum::<i64>()));
        prop_assert_eq!(tree.total(), Some(&values.iter().sum::<i64>()));
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), values);
    }

    // query(i, i) forwards to get(i)
    #[test]
    fn prop_equal_endpoints_read_element(values in strategy_values()) {
        let tree = SegmentTree::new(values.clone(), sum);
        for i in 0..values.len() as isize {
            prop_assert_eq!(tree.query(i, i), tree.get(i).cloned());
        }
    }

    // a negative index addresses the same leaf as index + capacity
    #[test]
    fn prop_negative_index_aliases(values in strategy_values()) {
        let tree = SegmentTree::new(values, sum);
        let capacity = tree.capacity() as isize;
        for i in 0..capacity {
            prop_assert_eq!(tree.get(i - capacity), tree.get(i).map_err(|_| {
                SegmentTreeError::IndexOutOfRange { index: i - capacity, capacity: capacity as usize }
            }));
        }
    }

    // indices and ranges outside the capacity are rejected without mutation
    #[test]
    fn prop_out_of_range_rejected(values in strategy_values(), past in 0_isize..100) {
        let mut tree = SegmentTree::new(values.clone(), sum);
        let capacity = tree.capacity() as isize;
        let far = capacity + past;
        prop_assert!(
            matches!(tree.get(far), Err(SegmentTreeError::IndexOutOfRange { .. })),
            "get past capacity"
        );
        prop_assert!(
            matches!(tree.get(-far - 1), Err(SegmentTreeError::IndexOutOfRange { .. })),
            "get before -capacity"
        );
        prop_assert!(
            matches!(tree.set(far, 0), Err(SegmentTreeError::IndexOutOfRange { .. })),
            "set past capacity"
        );
        prop_assert!(
            matches!(tree.query(0, far + 1), Err(SegmentTreeError::InvalidRange { .. })),
            "stop past capacity"
        );
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), values);
    }
}
