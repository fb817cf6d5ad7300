use alloc::collections::BTreeMap;

use crate::record::AddRecord;

/// The part of one dictionary's state that another replica is missing.
///
/// Produced by [`DeltaCrdt::delta`](crate::DeltaCrdt::delta) and consumed by
/// [`DeltaCrdt::apply_delta`](crate::DeltaCrdt::apply_delta). It is plain
/// data: a set of add-records and a set of tombstones, ready to be shipped
/// by whatever transport the embedding system uses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DictDelta<K: Ord, V, T> {
    added: BTreeMap<K, AddRecord<V, T>>,
    removed: BTreeMap<K, T>,
}

impl<K: Ord, V, T> DictDelta<K, V, T> {
    pub(crate) fn from_maps(added: BTreeMap<K, AddRecord<V, T>>, removed: BTreeMap<K, T>) -> Self {
        Self { added, removed }
    }

    /// Add-records carried by this delta.
    pub fn records(&self) -> impl Iterator<Item = (&K, &AddRecord<V, T>)> {
        self.added.iter()
    }

    /// Tombstones carried by this delta.
    pub fn tombstones(&self) -> impl Iterator<Item = (&K, &T)> {
        self.removed.iter()
    }

    /// Total number of records and tombstones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Whether there is nothing to ship.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
