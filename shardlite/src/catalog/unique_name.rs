// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Unique name allocator
//!
//! Generates implicit object names (for example for unnamed indexes) that
//! collide neither with a live object nor with a name another caller has
//! been handed but not yet committed. A generated name stays reserved for
//! as long as its [`NameReservation`] lives; committing the name through
//! `Schema::add`/`Schema::rename` or dropping the guard releases it.

use super::string_map::fold_name;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Upper-case hex digest of an object name
pub fn name_digest(name: &str) -> String {
    format!("{:X}", crc32fast::hash(name.as_bytes()))
}

/// Names handed out but not yet committed, each tagged with the token of
/// the reservation that owns it
#[derive(Debug, Default)]
pub struct ReservationSet {
    ignore_case: bool,
    names: Mutex<HashMap<String, u64>>,
    next_token: AtomicU64,
}

impl ReservationSet {
    pub fn new(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            names: Mutex::new(HashMap::new()),
            next_token: AtomicU64::new(1),
        }
    }

    /// Pick and reserve a name derived from `base_name`
    ///
    /// Candidates are `prefix` followed by growing prefixes of the digest
    /// of `base_name`, then `prefix + digest + "_" + n` for n = 0, 1, ...
    /// The first candidate for which `is_live` is false and that nobody has
    /// reserved wins. Probing and reserving happen under one lock, so
    /// concurrent callers never receive the same name.
    pub fn reserve_unique<F>(&self, base_name: &str, prefix: &str, is_live: F) -> NameReservation<'_>
    where
        F: Fn(&str) -> bool,
    {
        let digest = name_digest(base_name);
        let mut names = self.names.lock();

        let taken = |candidate: &str| {
            is_live(candidate) || names.contains_key(fold_name(self.ignore_case, candidate).as_ref())
        };
        let short = (1..=digest.len())
            .map(|len| format!("{}{}", prefix, &digest[..len]))
            .find(|candidate| !taken(candidate));
        let name = match short {
            Some(name) => name,
            None => {
                let mut n: u64 = 0;
                loop {
                    let candidate = format!("{}{}_{}", prefix, digest, n);
                    if !taken(&candidate) {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };

        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        names.insert(self.key(&name), token);
        log::debug!("reserved unique name {} for {}", name, base_name);

        NameReservation {
            set: self,
            name,
            token,
            released: false,
        }
    }

    /// Drop the reservation on `name`, whoever holds it
    pub fn free(&self, name: &str) {
        self.names.lock().remove(&self.key(name));
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.names.lock().contains_key(&self.key(name))
    }

    pub fn len(&self) -> usize {
        self.names.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, name: &str, token: u64) {
        let key = self.key(name);
        let mut names = self.names.lock();
        if names.get(&key) == Some(&token) {
            names.remove(&key);
        }
    }

    fn key(&self, name: &str) -> String {
        fold_name(self.ignore_case, name).into_owned()
    }
}

/// A generated name, reserved until committed or dropped
///
/// Dropping the guard releases the reservation on every exit path. If the
/// name was committed in between (and possibly reserved again by another
/// caller), the drop leaves the newer reservation alone.
#[must_use = "the name is released as soon as the reservation is dropped"]
pub struct NameReservation<'a> {
    set: &'a ReservationSet,
    name: String,
    token: u64,
    released: bool,
}

impl NameReservation<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Give the name back without committing it
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if !self.released {
            self.set.release(&self.name, self.token);
            self.released = true;
        }
    }
}

impl Drop for NameReservation<'_> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl fmt::Debug for NameReservation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameReservation")
            .field("name", &self.name)
            .field("token", &self.token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_digest_is_stable_upper_hex() {
        let digest = name_digest("ORDERS");
        assert_eq!(digest, name_digest("ORDERS"));
        assert!(!digest.is_empty() && digest.len() <= 8);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_first_candidate_uses_one_digest_char() {
        let set = ReservationSet::new(false);
        let digest = name_digest("T1");
        let reservation = set.reserve_unique("T1", "IDX_", |_| false);
        assert_eq!(reservation.name(), format!("IDX_{}", &digest[..1]));
        assert!(set.is_reserved(reservation.name()));
    }

    #[test]
    fn test_outstanding_reservations_grow_the_digest_prefix() {
        let set = ReservationSet::new(false);
        let digest = name_digest("T1");
        let first = set.reserve_unique("T1", "IDX_", |_| false);
        let second = set.reserve_unique("T1", "IDX_", |_| false);
        assert_ne!(first.name(), second.name());
        assert_eq!(second.name(), format!("IDX_{}", &digest[..2.min(digest.len())]));
    }

    #[test]
    fn test_falls_back_to_counter_suffix() {
        let set = ReservationSet::new(false);
        let digest = name_digest("T1");
        let live: HashSet<String> = (1..=digest.len())
            .map(|len| format!("IDX_{}", &digest[..len]))
            .collect();

        let first = set.reserve_unique("T1", "IDX_", |name| live.contains(name));
        let second = set.reserve_unique("T1", "IDX_", |name| live.contains(name));
        assert_eq!(first.name(), format!("IDX_{}_0", digest));
        assert_eq!(second.name(), format!("IDX_{}_1", digest));
    }

    #[test]
    fn test_drop_releases_reservation() {
        let set = ReservationSet::new(false);
        let name = {
            let reservation = set.reserve_unique("T1", "IDX_", |_| false);
            reservation.name().to_string()
        };
        assert!(!set.is_reserved(&name));
        assert!(set.is_empty());
    }

    #[test]
    fn test_stale_guard_does_not_release_newer_reservation() {
        let set = ReservationSet::new(false);
        let stale = set.reserve_unique("T1", "IDX_", |_| false);
        let name = stale.name().to_string();

        // commit path frees the name, then another caller gets it again
        set.free(&name);
        let fresh = set.reserve_unique("T1", "IDX_", |_| false);
        assert_eq!(fresh.name(), name);

        drop(stale);
        assert!(set.is_reserved(&name));
        fresh.release();
        assert!(!set.is_reserved(&name));
    }

    #[test]
    fn test_ignore_case_reservations() {
        let set = ReservationSet::new(true);
        let reservation = set.reserve_unique("T1", "idx_", |_| false);
        assert!(set.is_reserved(&reservation.name().to_uppercase()));
    }
}
