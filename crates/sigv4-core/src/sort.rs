//! Sort core (C3): a generic comparator-driven in-place sort.
//!
//! A `(void*, size_t, comparator)` interface is a C artifact; here it is a
//! monomorphic function generic over the record type. `slice::sort_unstable_by`
//! is pattern-defeating quicksort — in place, no heap allocation beyond a
//! bounded recursion stack — which satisfies "never allocates beyond bounded
//! scratch proportional to log2(count)". Stability in practice comes not
//! from the sort but from the total-order comparators in §4.5/§4.6: ties
//! between distinct records never occur.
use std::cmp::Ordering;

pub fn sort_records<T>(records: &mut [T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    records.sort_unstable_by(|a, b| cmp(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_comparator() {
        let mut values = vec![5, 3, 1, 4, 2];
        sort_records(&mut values, |a, b| a.cmp(b));
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let mut values: Vec<u8> = Vec::new();
        sort_records(&mut values, |a, b| a.cmp(b));
        assert!(values.is_empty());
    }

    #[test]
    fn total_order_comparator_is_deterministic_under_ties() {
        // A strict weak order with no ties between distinct records (as
        // §4.5/§4.6 guarantee) sorts identically regardless of input order.
        let mut a = vec![(1, "a"), (0, "b"), (1, "c")];
        let mut b = vec![(1, "c"), (0, "b"), (1, "a")];
        let by_first_then_second = |x: &(i32, &str), y: &(i32, &str)| {
            x.0.cmp(&y.0).then_with(|| x.1.cmp(y.1))
        };
        sort_records(&mut a, by_first_then_second);
        sort_records(&mut b, by_first_then_second);
        assert_eq!(a, b);
    }
}
