// Copyright 2026 MIDIFlux Contributors
// SPDX-License-Identifier: MIT

//! Profile-scoped State Store (C9, spec §3, §4.9, §5).
//!
//! Guarded by a single `parking_lot::Mutex` rather than fine-grained
//! per-key atomics — the teacher's workspace reaches for `parking_lot`
//! wherever a hot-path lock needs to avoid `std::sync::Mutex`'s poisoning
//! and syscall-heavy parking. `add` is the only read-modify-write
//! operation; it is atomic with respect to other State Store calls, but
//! `StateConditionalAction`'s read-then-branch is explicitly NOT atomic
//! with the sub-action it executes (spec §5) — that's a property of the
//! action, not of this store.

use parking_lot::Mutex;
use std::collections::HashMap;

/// `map<int, int>`, cleared on every profile activation and initialized
/// from `initial_states`.
#[derive(Debug, Default)]
pub struct StateStore {
    inner: Mutex<HashMap<i64, i64>>,
}

impl StateStore {
    pub fn new() -> Self {
        StateStore {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a store pre-populated from a profile's `initial_states`.
    pub fn from_initial(initial: &HashMap<i64, i64>) -> Self {
        StateStore {
            inner: Mutex::new(initial.clone()),
        }
    }

    pub fn get(&self, key: i64) -> i64 {
        *self.inner.lock().get(&key).unwrap_or(&0)
    }

    /// Sets `key` to `value`, returning the previous value (default 0).
    pub fn set(&self, key: i64, value: i64) -> i64 {
        let mut guard = self.inner.lock();
        guard.insert(key, value).unwrap_or(0)
    }

    /// Atomic read-modify-write: adds `delta` to `key`, returning the new value.
    pub fn add(&self, key: i64, delta: i64) -> i64 {
        let mut guard = self.inner.lock();
        let entry = guard.entry(key).or_insert(0);
        *entry += delta;
        *entry
    }

    pub fn reset(&self) {
        self.inner.lock().clear();
    }

    pub fn initialize(&self, values: &HashMap<i64, i64>) {
        let mut guard = self.inner.lock();
        guard.clear();
        guard.extend(values.iter().map(|(&k, &v)| (k, v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn get_defaults_to_zero() {
        let s = StateStore::new();
        assert_eq!(s.get(42), 0);
    }

    #[test]
    fn set_returns_previous() {
        let s = StateStore::new();
        assert_eq!(s.set(1, 10), 0);
        assert_eq!(s.set(1, 20), 10);
        assert_eq!(s.get(1), 20);
    }

    #[test]
    fn add_accumulates() {
        let s = StateStore::new();
        assert_eq!(s.add(1, 5), 5);
        assert_eq!(s.add(1, -2), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let s = StateStore::new();
        s.set(1, 10);
        s.reset();
        assert_eq!(s.get(1), 0);
    }

    #[test]
    fn initialize_from_profile_map() {
        let mut init = HashMap::new();
        init.insert(5, 100);
        let s = StateStore::from_initial(&init);
        assert_eq!(s.get(5), 100);
    }

    /// Testable property from spec §8: N concurrent `add(k, +1)` calls
    /// starting from 0 yield exactly N.
    #[test]
    fn concurrent_add_is_atomic() {
        let s = Arc::new(StateStore::new());
        let n = 200;
        let handles: Vec<_> = (0..n)
            .map(|_| {
                let s = Arc::clone(&s);
                thread::spawn(move || {
                    s.add(1, 1);
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(s.get(1), n as i64);
    }
}
