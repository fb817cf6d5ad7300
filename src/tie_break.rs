//! Deterministic tie-break policies for concurrent adds.
//!
//! When two add-records for the same key carry the *same* timestamp, the
//! timestamp alone cannot pick a winner. A [`TieBreak`] decides instead.
//!
//! Every replica must use the same policy, and the policy must be a total
//! order over values. Anything weaker (for example a hash that can collide,
//! or a hash seeded per process) makes the outcome of a merge depend on the
//! order in which replicas were merged.

use core::cmp::Ordering;
use core::fmt;

/// A total, deterministic order over values used to settle add/add conflicts
/// at equal timestamps.
///
/// The incoming value wins iff [`TieBreak::compare`] returns
/// [`Ordering::Greater`] for `(incoming, current)`.
pub trait TieBreak<V> {
    /// Compare two conflicting values.
    fn compare(&self, a: &V, b: &V) -> Ordering;

    /// Whether `incoming` should replace `current`.
    fn prefers(&self, incoming: &V, current: &V) -> bool {
        self.compare(incoming, current) == Ordering::Greater
    }
}

/// The greater value (by [`Ord`]) wins. This is the default policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GreaterWins;

impl<V: Ord> TieBreak<V> for GreaterWins {
    fn compare(&self, a: &V, b: &V) -> Ordering {
        a.cmp(b)
    }
}

/// The lesser value (by [`Ord`]) wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LesserWins;

impl<V: Ord> TieBreak<V> for LesserWins {
    fn compare(&self, a: &V, b: &V) -> Ordering {
        b.cmp(a)
    }
}

/// A caller-supplied comparator.
///
/// Useful when `V` has no natural [`Ord`], or when the order should be
/// derived from some stable content digest.
///
/// ```
/// use core::cmp::Ordering;
/// use lww_element_dict::prelude::*;
///
/// // Longest string wins, then lexicographic.
/// let by_len = OrderBy::new(|a: &String, b: &String| {
///     a.len().cmp(&b.len()).then_with(|| a.cmp(b))
/// });
///
/// let mut d: LWWDict<u8, String, u64, _> = LWWDict::with_tie_break(by_len);
/// d.add(1, "zz".to_string(), 5).add(1, "aaa".to_string(), 5);
/// assert_eq!(d.lookup(&1).map(String::as_str), Some("aaa"));
/// ```
pub struct OrderBy<V> {
    cmp: fn(&V, &V) -> Ordering,
}

impl<V> OrderBy<V> {
    /// Wrap a comparator. It must be a total order, identical on every replica.
    pub fn new(cmp: fn(&V, &V) -> Ordering) -> Self {
        Self { cmp }
    }
}

impl<V> TieBreak<V> for OrderBy<V> {
    fn compare(&self, a: &V, b: &V) -> Ordering {
        (self.cmp)(a, b)
    }
}

// Derives would demand `V: Clone` for a bare fn pointer.
impl<V> Clone for OrderBy<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for OrderBy<V> {}

impl<V> fmt::Debug for OrderBy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderBy").finish_non_exhaustive()
    }
}
