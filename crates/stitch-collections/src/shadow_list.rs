use serde::{Deserialize, Serialize};

use crate::ImVec;

/// A persistent association list where the most recently added entry comes first.
///
/// Entries are never replaced: adding a key that is already present shadows the
/// older entry, which stays visible to `iter` but is no longer returned by `get`.
/// This is exactly the lookup rule of lexical scoping.
///
/// Cloning is cheap because the underlying vector shares structure,
/// so snapshots can be taken freely at every program point.
///
/// ```text
/// entries: [("x", 3), ("y", 2), ("x", 1)]
///            ↑
///         current binding for "x"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Clone, V: Serialize + Clone",
    deserialize = "K: Deserialize<'de> + Clone, V: Deserialize<'de> + Clone"
))]
pub struct ImShadowList<K: Clone, V: Clone> {
    entries: ImVec<(K, V)>,
}

impl<K: Clone, V: Clone> ImShadowList<K, V> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            entries: ImVec::new(),
        }
    }

    /// Returns the number of entries, shadowed ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates from the most recent entry to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.entries.iter()
    }

    /// Adds an entry in front of all others.
    pub fn push(&mut self, key: K, value: V) {
        self.entries.push_front((key, value));
    }

    /// Returns a new list with the entry added in front, leaving `self` untouched.
    pub fn update(&self, key: K, value: V) -> Self {
        let mut new = self.clone();
        new.push(key, value);
        new
    }
}

impl<K: Clone + PartialEq, V: Clone> ImShadowList<K, V> {
    /// Gets the value of the most recent entry for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates over the entries that are not shadowed by a more recent one.
    pub fn visible(&self) -> impl Iterator<Item = &(K, V)> {
        self.entries.iter().enumerate().filter_map(move |(idx, entry)| {
            let shadowed = self.entries.iter().take(idx).any(|(k, _)| *k == entry.0);
            (!shadowed).then_some(entry)
        })
    }
}

impl<K: Clone, V: Clone> Default for ImShadowList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> FromIterator<(K, V)> for ImShadowList<K, V> {
    /// Builds the list by adding the items in order, so the last item ends up first.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (k, v) in iter {
            list.push(k, v);
        }
        list
    }
}
