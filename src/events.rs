//! Operation-based view of the dictionary.
//!
//! Besides merging full states, replicas can exchange individual
//! operations. Each [`DictOp`] is a self-contained event that can be
//! persisted to a log, broadcast, and replayed. Because every operation
//! carries its own timestamp, replay order and duplicates do not matter.

use crate::dict::LWWDict;
use crate::tie_break::TieBreak;
use crate::Crdt;

/// A CRDT that can express its mutations as discrete operations.
pub trait OpCrdt: Crdt {
    /// The operation type this CRDT accepts.
    type Op;

    /// Apply an operation from a local or remote source.
    ///
    /// Applying the same operations in any order, any number of times,
    /// yields the same state.
    fn apply_op(&mut self, op: &Self::Op);
}

/// A single dictionary mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DictOp<K, V, T> {
    /// See [`LWWDict::add`].
    Add {
        /// Target key.
        key: K,
        /// Assigned value.
        value: V,
        /// Operation timestamp.
        timestamp: T,
    },
    /// See [`LWWDict::remove`].
    Remove {
        /// Target key.
        key: K,
        /// Operation timestamp.
        timestamp: T,
    },
    /// See [`LWWDict::update`].
    Update {
        /// Target key.
        key: K,
        /// Assigned value.
        value: V,
        /// Operation timestamp.
        timestamp: T,
    },
}

impl<K, V, T> DictOp<K, V, T> {
    /// The key this operation targets.
    pub fn key(&self) -> &K {
        match self {
            Self::Add { key, .. } | Self::Remove { key, .. } | Self::Update { key, .. } => key,
        }
    }

    /// The operation timestamp.
    pub fn timestamp(&self) -> &T {
        match self {
            Self::Add { timestamp, .. }
            | Self::Remove { timestamp, .. }
            | Self::Update { timestamp, .. } => timestamp,
        }
    }
}

impl<K, V, T, S> OpCrdt for LWWDict<K, V, T, S>
where
    K: Ord + Clone,
    V: Clone,
    T: Ord + Clone,
    S: TieBreak<V>,
{
    type Op = DictOp<K, V, T>;

    fn apply_op(&mut self, op: &DictOp<K, V, T>) {
        match op {
            DictOp::Add {
                key,
                value,
                timestamp,
            } => {
                self.add(key.clone(), value.clone(), timestamp.clone());
            }
            DictOp::Remove { key, timestamp } => {
                self.remove(key.clone(), timestamp.clone());
            }
            DictOp::Update {
                key,
                value,
                timestamp,
            } => {
                self.update(key.clone(), value.clone(), timestamp.clone());
            }
        }
    }
}
