// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::hash::Hash;
use std::sync::Arc;

use ahash::HashMap;
use cid::Cid;

/// A loaded actor sub-collection (HAMT or AMT) together with its root.
///
/// Two collections with the same root hold the same entries, which is what
/// makes [`Map::changed`] a cheap change predicate: callers compare roots
/// before touching the entries.
#[derive(Clone, Debug)]
pub struct Map<K, V> {
    root: Cid,
    entries: Arc<HashMap<K, V>>,
}

/// Entry-level difference between two versions of a [`Map`].
#[derive(Debug)]
pub struct MapChanges<'a, K, V> {
    pub added: Vec<(&'a K, &'a V)>,
    pub modified: Vec<Modified<'a, K, V>>,
    pub removed: Vec<(&'a K, &'a V)>,
}

#[derive(Debug)]
pub struct Modified<'a, K, V> {
    pub key: &'a K,
    pub from: &'a V,
    pub to: &'a V,
}

impl<K, V> Default for MapChanges<'_, K, V> {
    fn default() -> Self {
        Self {
            added: vec![],
            modified: vec![],
            removed: vec![],
        }
    }
}

impl<K, V> MapChanges<'_, K, V> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

impl<K, V> Map<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    pub fn new(root: Cid, entries: HashMap<K, V>) -> Self {
        Self {
            root,
            entries: Arc::new(entries),
        }
    }

    pub fn root(&self) -> &Cid {
        &self.root
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `other` is a different version of this collection.
    pub fn changed(&self, other: &Self) -> bool {
        self.root != other.root
    }

    /// Changes going from `self` to `newer`. Unchanged roots are never scanned.
    pub fn diff<'a>(&'a self, newer: &'a Self) -> MapChanges<'a, K, V> {
        let mut changes = MapChanges::default();
        if !self.changed(newer) {
            return changes;
        }
        for (key, to) in newer.entries.iter() {
            match self.entries.get(key) {
                None => changes.added.push((key, to)),
                Some(from) if from != to => changes.modified.push(Modified { key, from, to }),
                Some(_) => {}
            }
        }
        for (key, from) in self.entries.iter() {
            if !newer.entries.contains_key(key) {
                changes.removed.push((key, from));
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::dummy_cid;

    fn map(root: u64, entries: &[(u64, &'static str)]) -> Map<u64, &'static str> {
        Map::new(dummy_cid(root), entries.iter().copied().collect())
    }

    #[test]
    fn same_root_is_unchanged_even_if_entries_differ() {
        // entries are trusted to match the root; the predicate only looks at roots
        let a = map(1, &[(1, "a")]);
        let b = map(1, &[(1, "b")]);
        assert!(!a.changed(&b));
        assert!(a.diff(&b).is_empty());
    }

    #[test]
    fn diff_reports_added_modified_removed() {
        let old = map(1, &[(1, "a"), (2, "b"), (3, "c")]);
        let new = map(2, &[(1, "a"), (2, "B"), (4, "d")]);
        let changes = old.diff(&new);
        assert_eq!(changes.added, vec![(&4, &"d")]);
        assert_eq!(changes.modified.len(), 1);
        assert_eq!(*changes.modified[0].key, 2);
        assert_eq!(*changes.modified[0].from, "b");
        assert_eq!(*changes.modified[0].to, "B");
        assert_eq!(changes.removed, vec![(&3, &"c")]);
    }
}
