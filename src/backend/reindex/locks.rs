//! Per-Parent Locks
//!
//! Serializes reindex operations that touch the same sibling set. Each parent
//! id (board for lists, list for cards) gets its own async mutex, created on
//! first use and pruned by a periodic cleanup once nobody holds it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Map of parent id to its async mutex
#[derive(Clone, Default)]
pub struct ParentLocks {
    slots: Arc<Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

/// Held locks for one or more parents; released on drop
#[must_use = "the parent locks are released as soon as the guard is dropped"]
pub struct ParentGuard {
    _guards: Vec<OwnedMutexGuard<()>>,
}

impl ParentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the mutex for a parent
    fn slot(&self, parent_id: Uuid) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots
            .entry(parent_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Lock a single parent
    pub async fn lock(&self, parent_id: Uuid) -> ParentGuard {
        self.lock_many(&[parent_id]).await
    }

    /// Lock several parents at once
    ///
    /// Ids are deduplicated and acquired in ascending order so two moves
    /// between the same pair of parents cannot deadlock.
    pub async fn lock_many(&self, parent_ids: &[Uuid]) -> ParentGuard {
        let mut ids = parent_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut guards = Vec::with_capacity(ids.len());
        for id in ids {
            guards.push(self.slot(id).lock_owned().await);
        }
        ParentGuard { _guards: guards }
    }

    /// Drop mutexes nobody holds or waits on; returns how many were removed
    pub fn cleanup_idle(&self) -> usize {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let before = slots.len();
        slots.retain(|_, slot| Arc::strong_count(slot) > 1);
        before - slots.len()
    }

    /// Number of tracked parents (for debugging)
    pub fn tracked(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
