//! Per-note mutual exclusion.

use crate::domain::NoteId;
use dashmap::DashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of one mutex per note id.
///
/// Mutations of the same note run one at a time; different notes proceed
/// in parallel. Entries are created on first use and dropped again once no
/// caller holds or waits on them.
#[derive(Debug, Default)]
pub struct NoteLocks {
    locks: DashMap<NoteId, Arc<Mutex<()>>>,
}

impl NoteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `id`.
    pub fn with_lock<T>(&self, id: &NoteId, f: impl FnOnce() -> T) -> T {
        // Declared first so it drops last, after the guard and our Arc,
        // including when `f` unwinds.
        let _prune = PruneOnDrop { locks: self, id };

        // Clone the Arc out so the shard guard is released before blocking.
        let lock = self
            .locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        // A panic in another holder leaves nothing to repair: the database
        // transaction it held was rolled back on drop.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn prune(&self, id: &NoteId) {
        // The map's own reference is the only one left.
        self.locks.remove_if(id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// Drops the registry entry for `id` once the caller is done with it.
struct PruneOnDrop<'a> {
    locks: &'a NoteLocks,
    id: &'a NoteId,
}

impl Drop for PruneOnDrop<'_> {
    fn drop(&mut self) {
        self.locks.prune(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn with_lock_returns_closure_result() {
        let locks = NoteLocks::new();
        let id = NoteId::new();
        assert_eq!(locks.with_lock(&id, || 42), 42);
    }

    #[test]
    fn entries_are_pruned_after_use() {
        let locks = NoteLocks::new();
        let id = NoteId::new();
        locks.with_lock(&id, || {
            assert_eq!(locks.len(), 1);
        });
        assert!(locks.is_empty());
    }

    #[test]
    fn same_note_is_serialized() {
        let locks = NoteLocks::new();
        let id = NoteId::new();
        let inside = AtomicUsize::new(0);
        let max_inside = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    locks.with_lock(&id, || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(2));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                });
            }
        });

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn different_notes_do_not_block_each_other() {
        let locks = NoteLocks::new();
        let a = NoteId::new();
        let b = NoteId::new();

        // Holding A while taking B on the same thread would deadlock if the
        // two shared a lock.
        let value = locks.with_lock(&a, || locks.with_lock(&b, || "both"));
        assert_eq!(value, "both");
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let locks = NoteLocks::new();
        let id = NoteId::new();

        thread::scope(|s| {
            let handle = s.spawn(|| {
                locks.with_lock::<()>(&id, || panic!("boom"));
            });
            assert!(handle.join().is_err());
        });

        assert_eq!(locks.with_lock(&id, || 7), 7);
    }

    #[test]
    fn entry_is_pruned_when_closure_panics() {
        let locks = NoteLocks::new();
        let id = NoteId::new();

        thread::scope(|s| {
            let handle = s.spawn(|| {
                locks.with_lock::<()>(&id, || panic!("boom"));
            });
            assert!(handle.join().is_err());
        });

        assert!(locks.is_empty());
    }
}
