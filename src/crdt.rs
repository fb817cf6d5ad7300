/// Core trait that all state-based CRDTs in this crate implement.
///
/// A CRDT (Conflict-free Replicated Data Type) guarantees that concurrent
/// updates on different replicas will converge to the same state after merging,
/// without requiring coordination.
///
/// # Properties
///
/// All implementations must satisfy:
/// - **Commutativity:** `a.merge(b) == b.merge(a)`
/// - **Associativity:** `a.merge(b.merge(c)) == a.merge(b).merge(c)`
/// - **Idempotency:** `a.merge(a) == a`
pub trait Crdt {
    /// Merge another replica's state into this one.
    ///
    /// After merging, `self` contains the least upper bound of both states.
    /// `other` is never modified.
    fn merge(&mut self, other: &Self);
}

/// Extension trait for delta-state CRDTs.
///
/// Instead of shipping its full state, a replica can ship only the part
/// another replica is missing.
///
/// # Example
///
/// ```
/// use lww_element_dict::prelude::*;
///
/// let mut a: LWWDict<&str, u32, u64> = LWWDict::new();
/// a.add("x", 1, 1).add("y", 2, 2);
///
/// let mut b: LWWDict<&str, u32, u64> = LWWDict::new();
/// b.add("x", 1, 1);
///
/// let delta = a.delta(&b);
/// assert_eq!(delta.len(), 1); // only "y" is missing on b
///
/// b.apply_delta(&delta);
/// assert_eq!(b, a);
/// ```
pub trait DeltaCrdt: Crdt {
    /// The type of delta produced by this CRDT.
    type Delta;

    /// Generate a delta containing changes in `self` that `other` does not have.
    fn delta(&self, other: &Self) -> Self::Delta;

    /// Apply a delta to this replica's state.
    ///
    /// Equivalent to merging the state that produced the delta.
    fn apply_delta(&mut self, delta: &Self::Delta);
}
