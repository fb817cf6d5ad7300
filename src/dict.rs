use alloc::collections::btree_map::Entry;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::mem;

use log::{debug, trace};

use crate::delta::DictDelta;
use crate::record::AddRecord;
use crate::tie_break::{GreaterWins, TieBreak};
use crate::{Crdt, DeltaCrdt};

/// A last-write-wins element dictionary (LWW-Element-Dict).
///
/// Holds two maps: `added` keeps the winning [`AddRecord`] per key and
/// `removed` keeps the latest tombstone timestamp per key. Whether a key is
/// present is never stored; it is derived on every read. A key is live iff
/// its add-record is strictly newer than its tombstone, so a remove at the
/// same instant as the latest add hides the key.
///
/// Two different tie-breaks are involved:
/// - add vs. add at an equal timestamp: the [`TieBreak`] policy `S` picks
///   the value (greatest value by default);
/// - add vs. remove at an equal timestamp: the remove wins.
///
/// Mutation happens in place. Clone a dictionary to take a snapshot before
/// sharing it. Tombstones are never collected: a removed key keeps both of its
/// records forever, trading space for convergence.
///
/// # Example
///
/// ```
/// use lww_element_dict::prelude::*;
///
/// let mut d1: LWWDict<&str, i32, u64> = LWWDict::new();
/// d1.add("a", 1, 1).add("b", 2, 2);
///
/// let mut d2: LWWDict<&str, i32, u64> = LWWDict::new();
/// d2.add("a", 0, 0).remove("a", 1);
///
/// // Remove and add both happened at t=1; the remove wins.
/// let merged = d1.merged(&d2);
/// assert_eq!(merged.lookup(&"a"), None);
/// assert_eq!(merged.lookup(&"b"), Some(&2));
/// assert_eq!(merged, d2.merged(&d1));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LWWDict<K: Ord, V, T: Ord, S = GreaterWins> {
    added: BTreeMap<K, AddRecord<V, T>>,
    removed: BTreeMap<K, T>,
    #[cfg_attr(feature = "serde", serde(skip))]
    tie_break: S,
}

impl<K: Ord, V, T: Ord> LWWDict<K, V, T> {
    /// Create an empty dictionary where the greater value wins add/add ties.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tie_break(GreaterWins)
    }
}

impl<K: Ord, V, T: Ord, S> LWWDict<K, V, T, S> {
    /// Create an empty dictionary with an explicit tie-break policy.
    ///
    /// Every replica that will ever be merged with this one must use the
    /// same policy.
    #[must_use]
    pub fn with_tie_break(tie_break: S) -> Self {
        Self {
            added: BTreeMap::new(),
            removed: BTreeMap::new(),
            tie_break,
        }
    }

    /// The tie-break policy in use.
    pub fn tie_break(&self) -> &S {
        &self.tie_break
    }

    /// Get the value for `key` if it is live.
    #[must_use]
    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.added
            .get(key)
            .filter(|record| record.is_live(self.removed.get(key)))
            .map(|record| &record.value)
    }

    /// Check whether `key` is live.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if no key is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterate over live entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.added
            .iter()
            .filter(move |(key, record)| record.is_live(self.removed.get(*key)))
            .map(|(key, record)| (key, &record.value))
    }

    /// Iterate over live keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over the values of live keys, in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// The winning add-record for `key`, whether or not it is tombstoned.
    #[must_use]
    pub fn add_record(&self, key: &K) -> Option<&AddRecord<V, T>> {
        self.added.get(key)
    }

    /// The latest tombstone timestamp for `key`.
    #[must_use]
    pub fn tombstone(&self, key: &K) -> Option<&T> {
        self.removed.get(key)
    }

    /// Iterate over every add-record, live or not.
    pub fn records(&self) -> impl Iterator<Item = (&K, &AddRecord<V, T>)> {
        self.added.iter()
    }

    /// Iterate over every tombstone.
    pub fn tombstones(&self) -> impl Iterator<Item = (&K, &T)> {
        self.removed.iter()
    }
}

impl<K: Ord, V, T: Ord, S: TieBreak<V>> LWWDict<K, V, T, S> {
    /// Assign `value` to `key` as of `timestamp`.
    ///
    /// Takes effect if the key has no add-record yet, if `timestamp` is
    /// later than the stored one, or if the timestamps are equal and the
    /// tie-break policy prefers `value`. Otherwise this is a no-op. The
    /// tombstone map is never touched.
    pub fn add(&mut self, key: K, value: V, timestamp: T) -> &mut Self {
        let incoming = AddRecord::new(value, timestamp);
        match self.added.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => {
                if incoming.wins_over(slot.get(), &self.tie_break) {
                    slot.insert(incoming);
                } else {
                    trace!("add discarded: superseded by stored record");
                }
            }
        }
        self
    }

    /// Record a removal of `key` as of `timestamp`.
    ///
    /// Ignored when `key` was never added. An existing tombstone is only
    /// moved forward: the stored timestamp is the maximum seen.
    pub fn remove(&mut self, key: K, timestamp: T) -> &mut Self {
        if !self.added.contains_key(&key) {
            trace!("remove discarded: key was never added");
            return self;
        }
        match self.removed.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(timestamp);
            }
            Entry::Occupied(mut slot) => {
                if timestamp > *slot.get() {
                    slot.insert(timestamp);
                } else {
                    trace!("remove discarded: older than stored tombstone");
                }
            }
        }
        self
    }

    /// Like [`add`](Self::add), but only for keys that already have an
    /// add-record (tombstoned or not).
    pub fn update(&mut self, key: K, value: V, timestamp: T) -> &mut Self {
        if !self.added.contains_key(&key) {
            trace!("update discarded: key was never added");
            return self;
        }
        self.add(key, value, timestamp)
    }

    /// Rebuild a dictionary from raw add-records and tombstones, replaying
    /// them under the usual rules. Tombstones are replayed after all
    /// add-records so their relative order does not matter.
    pub fn from_parts<R, D>(records: R, tombstones: D, tie_break: S) -> Self
    where
        R: IntoIterator<Item = (K, AddRecord<V, T>)>,
        D: IntoIterator<Item = (K, T)>,
    {
        let mut dict = Self::with_tie_break(tie_break);
        for (key, record) in records {
            dict.add(key, record.value, record.timestamp);
        }
        for (key, timestamp) in tombstones {
            dict.remove(key, timestamp);
        }
        dict
    }
}

impl<K, V, T, S> LWWDict<K, V, T, S>
where
    K: Ord + Clone,
    V: Clone,
    T: Ord + Clone,
    S: TieBreak<V>,
{
    /// Merge any number of dictionaries into a new one.
    ///
    /// Inputs are not modified and the result does not depend on their
    /// order. Zero inputs give an empty dictionary.
    ///
    /// ```
    /// use lww_element_dict::prelude::*;
    ///
    /// let mut a: LWWDict<char, u8, u32> = LWWDict::new();
    /// a.add('a', 0, 0);
    /// let mut b: LWWDict<char, u8, u32> = LWWDict::new();
    /// b.add('b', 1, 1);
    /// let mut c: LWWDict<char, u8, u32> = LWWDict::new();
    /// c.add('c', 2, 2).remove('c', 3);
    ///
    /// let all = LWWDict::merge_all([&a, &b, &c]);
    /// assert_eq!(all.keys().collect::<Vec<_>>(), [&'a', &'b']);
    ///
    /// let none: LWWDict<char, u8, u32> = LWWDict::merge_all([]);
    /// assert!(none.is_empty());
    /// ```
    pub fn merge_all<'a, I>(dictionaries: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        S: Default + 'a,
        K: 'a,
        V: 'a,
        T: 'a,
    {
        Self::merge_all_with(S::default(), dictionaries)
    }

    /// [`merge_all`](Self::merge_all) with an explicit tie-break policy.
    pub fn merge_all_with<'a, I>(tie_break: S, dictionaries: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        S: 'a,
        K: 'a,
        V: 'a,
        T: 'a,
    {
        let inputs: Vec<&'a Self> = dictionaries.into_iter().collect();
        let mut merged = Self::with_tie_break(tie_break);
        for dict in &inputs {
            merged.absorb_records(dict.added.iter());
        }
        for dict in &inputs {
            merged.absorb_tombstones(dict.removed.iter());
        }
        debug!(
            "merged {} dictionaries into {} records and {} tombstones",
            inputs.len(),
            merged.added.len(),
            merged.removed.len()
        );
        merged
    }

    /// Merge `self` with `other` into a new dictionary.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self
    where
        S: Clone,
    {
        Self::merge_all_with(self.tie_break.clone(), [self, other])
    }

    /// Fold extra add-records and tombstones into `self`, leaving the same
    /// state [`merge_all`](Self::merge_all) would build: all add-records
    /// first, then all tombstones, including the ones `self` already holds.
    fn replay_with<'a, R, D>(&mut self, records: R, tombstones: D)
    where
        R: IntoIterator<Item = (&'a K, &'a AddRecord<V, T>)>,
        D: IntoIterator<Item = (&'a K, &'a T)>,
        K: 'a,
        V: 'a,
        T: 'a,
    {
        let own_tombstones = mem::take(&mut self.removed);
        self.absorb_records(records);
        self.absorb_tombstones(own_tombstones.iter());
        self.absorb_tombstones(tombstones);
        debug!(
            "replayed into {} records and {} tombstones",
            self.added.len(),
            self.removed.len()
        );
    }

    fn absorb_records<'a, R>(&mut self, records: R)
    where
        R: IntoIterator<Item = (&'a K, &'a AddRecord<V, T>)>,
        K: 'a,
        V: 'a,
        T: 'a,
    {
        for (key, record) in records {
            match self.added.get_mut(key) {
                Some(current) => {
                    if record.wins_over(current, &self.tie_break) {
                        *current = record.clone();
                    } else {
                        trace!("add-record discarded: superseded by stored record");
                    }
                }
                None => {
                    self.added.insert(key.clone(), record.clone());
                }
            }
        }
    }

    /// Tombstones whose key has no add-record in `self` are dropped.
    fn absorb_tombstones<'a, D>(&mut self, tombstones: D)
    where
        D: IntoIterator<Item = (&'a K, &'a T)>,
        K: 'a,
        T: 'a,
    {
        for (key, timestamp) in tombstones {
            if !self.added.contains_key(key) {
                trace!("tombstone discarded: key was never added");
                continue;
            }
            match self.removed.get_mut(key) {
                Some(current) => {
                    if *timestamp > *current {
                        *current = timestamp.clone();
                    } else {
                        trace!("tombstone discarded: older than stored tombstone");
                    }
                }
                None => {
                    self.removed.insert(key.clone(), timestamp.clone());
                }
            }
        }
    }
}

impl<K: Ord, V, T: Ord, S: Default> Default for LWWDict<K, V, T, S> {
    fn default() -> Self {
        Self::with_tie_break(S::default())
    }
}

// The policy is shared by all replicas and is not part of the state.
impl<K: Ord, V: PartialEq, T: Ord, S> PartialEq for LWWDict<K, V, T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.added == other.added && self.removed == other.removed
    }
}

impl<K: Ord, V: Eq, T: Ord, S> Eq for LWWDict<K, V, T, S> {}

impl<K, V, T, S> Crdt for LWWDict<K, V, T, S>
where
    K: Ord + Clone,
    V: Clone,
    T: Ord + Clone,
    S: TieBreak<V>,
{
    fn merge(&mut self, other: &Self) {
        self.replay_with(other.added.iter(), other.removed.iter());
    }
}

impl<K, V, T, S> DeltaCrdt for LWWDict<K, V, T, S>
where
    K: Ord + Clone,
    V: Clone,
    T: Ord + Clone,
    S: TieBreak<V>,
{
    type Delta = DictDelta<K, V, T>;

    fn delta(&self, other: &Self) -> DictDelta<K, V, T> {
        let added = self
            .added
            .iter()
            .filter(|(key, record)| {
                other
                    .added
                    .get(*key)
                    .map_or(true, |theirs| record.wins_over(theirs, &self.tie_break))
            })
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();
        let removed = self
            .removed
            .iter()
            .filter(|(key, timestamp)| {
                other
                    .removed
                    .get(*key)
                    .map_or(true, |theirs| *timestamp > theirs)
            })
            .map(|(key, timestamp)| (key.clone(), timestamp.clone()))
            .collect();
        DictDelta::from_maps(added, removed)
    }

    fn apply_delta(&mut self, delta: &DictDelta<K, V, T>) {
        self.replay_with(delta.records(), delta.tombstones());
    }
}
