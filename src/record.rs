use crate::tie_break::TieBreak;

/// The winning assignment for one key: "key was set to `value` as of
/// `timestamp`".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddRecord<V, T> {
    /// The assigned value.
    pub value: V,
    /// When the assignment happened.
    pub timestamp: T,
}

impl<V, T: Ord> AddRecord<V, T> {
    /// Create a record.
    pub fn new(value: V, timestamp: T) -> Self {
        Self { value, timestamp }
    }

    /// Whether this record replaces `current` under last-write-wins.
    ///
    /// A strictly later timestamp wins. At equal timestamps the tie-break
    /// policy decides; equal values never replace each other.
    pub fn wins_over<S: TieBreak<V>>(&self, current: &Self, tie_break: &S) -> bool {
        match self.timestamp.cmp(&current.timestamp) {
            core::cmp::Ordering::Greater => true,
            core::cmp::Ordering::Less => false,
            core::cmp::Ordering::Equal => tie_break.prefers(&self.value, &current.value),
        }
    }

    /// Whether a tombstone at `removed_at` hides this record.
    ///
    /// Removal wins ties: the record is live only if it is strictly newer.
    #[must_use]
    pub fn is_live(&self, removed_at: Option<&T>) -> bool {
        removed_at.map_or(true, |r| *r < self.timestamp)
    }
}
