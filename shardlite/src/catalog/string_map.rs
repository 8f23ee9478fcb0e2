// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Name-keyed container used for every catalog name space
//!
//! The database decides whether identifiers compare case-sensitively; the
//! map folds keys accordingly while the stored objects keep their own
//! spelling.

use std::borrow::Cow;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct StringMap<V> {
    ignore_case: bool,
    entries: BTreeMap<String, V>,
}

impl<V> StringMap<V> {
    pub fn new(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            entries: BTreeMap::new(),
        }
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Key under which `name` is stored
    pub fn key<'a>(&self, name: &'a str) -> Cow<'a, str> {
        fold_name(self.ignore_case, name)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(self.key(name).as_ref())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(self.key(name).as_ref())
    }

    pub fn insert(&mut self, name: &str, value: V) -> Option<V> {
        let key = self.key(name).into_owned();
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, name: &str) -> Option<V> {
        let key = self.key(name);
        self.entries.remove(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}

impl<V: Clone> StringMap<V> {
    /// Point-in-time copy of the values, ordered by key
    pub fn values(&self) -> Vec<V> {
        self.entries.values().cloned().collect()
    }

    pub fn first(&self) -> Option<V> {
        self.entries.values().next().cloned()
    }
}

pub(crate) fn fold_name(ignore_case: bool, name: &str) -> Cow<'_, str> {
    if ignore_case {
        Cow::Owned(name.to_uppercase())
    } else {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_sensitive_keys() {
        let mut map = StringMap::new(false);
        map.insert("Orders", 1);
        assert!(map.contains_key("Orders"));
        assert!(!map.contains_key("ORDERS"));
    }

    #[test]
    fn test_ignore_case_keys() {
        let mut map = StringMap::new(true);
        map.insert("Orders", 1);
        assert_eq!(map.get("ORDERS"), Some(&1));
        assert_eq!(map.insert("orders", 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove("oRdErS"), Some(2));
        assert!(map.is_empty());
    }

    #[test]
    fn test_values_snapshot_is_detached() {
        let mut map = StringMap::new(false);
        map.insert("B", 2);
        map.insert("A", 1);
        let snapshot = map.values();
        map.insert("C", 3);
        assert_eq!(snapshot, vec![1, 2]);
        assert_eq!(map.first(), Some(1));
    }
}
