//! Position Reindexer
//!
//! Keeps the `position` column of sibling rows dense and zero-based: lists
//! within a board and cards within a list. Four operations change a sibling
//! set and each one leaves every touched parent at `{0, 1, ..., k-1}`:
//!
//! - **append**: the new row takes `position = count(siblings)`
//! - **remove**: siblings above the removed row move down by one
//! - **reorder**: siblings between the old and new slot move by ±1
//! - **transfer**: the source parent closes its gap, the destination opens a
//!   slot, and the row takes its new parent and position
//!
//! # Isolation
//!
//! Every operation holds the mutex of each parent it touches (see
//! [`locks`]) and runs all of its reads and writes in one transaction. A
//! failure after the first write is reported as
//! [`ReindexError::PartialFailure`] and the transaction is rolled back, so the
//! stored positions never drift.
//!
//! Out-of-range targets are clamped: a reorder to `[0, count-1]`, a transfer
//! to `[0, count(destination)]`.
//!
//! # Module Structure
//!
//! ```text
//! reindex/
//! ├── mod.rs    - Reindexer operations and error type
//! ├── plan.rs   - Pure shift planning
//! ├── store.rs  - SQL primitives
//! └── locks.rs  - Per-parent async mutexes
//! ```

pub mod locks;
pub mod plan;
pub mod store;

use futures_util::future::BoxFuture;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use thiserror::Error;
use uuid::Uuid;

pub use locks::{ParentGuard, ParentLocks};
pub use plan::{InsertPlan, ReorderPlan, Shift};

/// How many times an entity lookup is retried when the entity changes parent
/// between the unlocked read and acquiring the parent lock
const LOOKUP_ATTEMPTS: usize = 3;

/// Which sibling set an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Lists ordered within a board
    Lists,
    /// Cards ordered within a list
    Cards,
}

impl Scope {
    pub fn table(&self) -> &'static str {
        match self {
            Scope::Lists => "lists",
            Scope::Cards => "cards",
        }
    }

    pub fn parent_column(&self) -> &'static str {
        match self {
            Scope::Lists => "board_id",
            Scope::Cards => "list_id",
        }
    }

    pub fn parent_table(&self) -> &'static str {
        match self {
            Scope::Lists => "boards",
            Scope::Cards => "lists",
        }
    }

    pub fn entity(&self) -> &'static str {
        match self {
            Scope::Lists => "list",
            Scope::Cards => "card",
        }
    }

    pub fn parent_entity(&self) -> &'static str {
        match self {
            Scope::Lists => "board",
            Scope::Cards => "list",
        }
    }
}

/// Where an entity sits: its parent and its position under that parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: Uuid,
    pub parent_id: Uuid,
    pub position: i64,
}

/// Reindexer failures
#[derive(Debug, Error)]
pub enum ReindexError {
    /// Referenced entity or parent does not exist; nothing was written
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// The entity kept changing parent while we tried to lock it
    #[error("{entity} {id} was moved concurrently")]
    Conflict { entity: &'static str, id: Uuid },

    /// A step after the first write failed; the transaction was rolled back
    #[error("reindexing {entity} {id} failed at '{step}': {source}")]
    PartialFailure {
        entity: &'static str,
        id: Uuid,
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Storage failure before anything was written
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ReindexError {
    fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Build the error mapper for a step that runs after the first write
fn partial(scope: Scope, id: Uuid, step: &'static str) -> impl FnOnce(sqlx::Error) -> ReindexError {
    move |source| {
        tracing::error!(
            entity = scope.entity(),
            %id,
            step,
            error = %source,
            "Reindex step failed after writes began; rolling back"
        );
        ReindexError::PartialFailure {
            entity: scope.entity(),
            id,
            step,
            source,
        }
    }
}

/// Runs position-maintaining operations against the database
#[derive(Clone)]
pub struct Reindexer {
    pool: SqlitePool,
    locks: ParentLocks,
}

impl Reindexer {
    pub fn new(pool: SqlitePool, locks: ParentLocks) -> Self {
        Self { pool, locks }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn locks(&self) -> &ParentLocks {
        &self.locks
    }

    /// Insert a new sibling at the end of `parent_id`
    ///
    /// `insert` receives the transaction's connection and the position the
    /// new row must take.
    pub async fn append<T, F>(&self, scope: Scope, parent_id: Uuid, insert: F) -> Result<T, ReindexError>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection, i64) -> BoxFuture<'c, Result<T, sqlx::Error>>,
    {
        let _guard = self.locks.lock(parent_id).await;
        let mut tx = store::begin_write(&self.pool).await?;

        if !store::parent_exists(&mut tx, scope, parent_id).await? {
            return Err(ReindexError::not_found(scope.parent_entity(), parent_id));
        }

        let position = store::count_siblings(&mut tx, scope, parent_id).await?;
        let value = insert(&mut *tx, position).await?;
        tx.commit().await?;

        tracing::debug!(entity = scope.entity(), %parent_id, position, "Appended");
        Ok(value)
    }

    /// Delete an entity and close the gap it leaves
    pub async fn remove(&self, scope: Scope, id: Uuid) -> Result<Placement, ReindexError> {
        let (_guard, mut tx, placement) = self.lock_entity(scope, id, None).await?;

        store::delete(&mut tx, scope, id).await?;

        let shift = plan::plan_remove(placement.position);
        let moved = store::shift(&mut tx, scope, placement.parent_id, shift, id)
            .await
            .map_err(partial(scope, id, "close gap"))?;
        tx.commit().await.map_err(partial(scope, id, "commit"))?;

        tracing::debug!(
            entity = scope.entity(),
            %id,
            parent_id = %placement.parent_id,
            position = placement.position,
            moved,
            "Removed"
        );
        Ok(placement)
    }

    /// Move an entity to `position` within its current parent
    pub async fn reorder(&self, scope: Scope, id: Uuid, position: i64) -> Result<Placement, ReindexError> {
        let (_guard, mut tx, placement) = self.lock_entity(scope, id, None).await?;
        let placement = Self::reorder_locked(&mut tx, scope, placement, position).await?;
        tx.commit().await.map_err(partial(scope, id, "commit"))?;
        Ok(placement)
    }

    /// Move an entity to `position` under `dest_parent`
    ///
    /// Falls back to [`Reindexer::reorder`] when `dest_parent` is the current
    /// parent.
    pub async fn transfer(
        &self,
        scope: Scope,
        id: Uuid,
        dest_parent: Uuid,
        position: i64,
    ) -> Result<Placement, ReindexError> {
        let (_guard, mut tx, placement) = self.lock_entity(scope, id, Some(dest_parent)).await?;

        if placement.parent_id == dest_parent {
            let placement = Self::reorder_locked(&mut tx, scope, placement, position).await?;
            tx.commit().await.map_err(partial(scope, id, "commit"))?;
            return Ok(placement);
        }

        if !store::parent_exists(&mut tx, scope, dest_parent).await? {
            return Err(ReindexError::not_found(scope.parent_entity(), dest_parent));
        }

        let dest_count = store::count_siblings(&mut tx, scope, dest_parent).await?;
        let insert = plan::plan_insert(position, dest_count);
        if insert.target != position {
            tracing::debug!(entity = scope.entity(), %id, requested = position, target = insert.target, "Clamped target position");
        }

        store::shift(&mut tx, scope, placement.parent_id, plan::plan_remove(placement.position), id).await?;

        if let Some(shift) = insert.shift {
            store::shift(&mut tx, scope, dest_parent, shift, id)
                .await
                .map_err(partial(scope, id, "open slot"))?;
        }

        store::set_placement(&mut tx, scope, id, dest_parent, insert.target)
            .await
            .map_err(partial(scope, id, "assign placement"))?;
        tx.commit().await.map_err(partial(scope, id, "commit"))?;

        tracing::debug!(
            entity = scope.entity(),
            %id,
            from_parent = %placement.parent_id,
            from = placement.position,
            to_parent = %dest_parent,
            to = insert.target,
            "Transferred"
        );

        Ok(Placement {
            id,
            parent_id: dest_parent,
            position: insert.target,
        })
    }

    /// Positions currently stored under a parent, ascending
    pub async fn positions(&self, scope: Scope, parent_id: Uuid) -> Result<Vec<i64>, ReindexError> {
        let mut conn = self.pool.acquire().await?;
        Ok(store::sibling_positions(&mut conn, scope, parent_id).await?)
    }

    /// Check that a parent's positions are dense; logs a warning on drift
    pub async fn check_dense(&self, scope: Scope, parent_id: Uuid) -> Result<bool, ReindexError> {
        let positions = self.positions(scope, parent_id).await?;
        let dense = plan::is_dense(&positions);
        if !dense {
            tracing::warn!(
                entity = scope.entity(),
                %parent_id,
                ?positions,
                "Sibling positions have drifted"
            );
        }
        Ok(dense)
    }

    /// Same-parent reorder inside an already locked transaction
    async fn reorder_locked(
        tx: &mut Transaction<'static, Sqlite>,
        scope: Scope,
        placement: Placement,
        position: i64,
    ) -> Result<Placement, ReindexError> {
        let count = store::count_siblings(tx, scope, placement.parent_id).await?;
        let plan = plan::plan_reorder(placement.position, position, count);
        if plan.target != position {
            tracing::debug!(entity = scope.entity(), id = %placement.id, requested = position, target = plan.target, "Clamped target position");
        }

        let Some(shift) = plan.shift else {
            return Ok(placement);
        };

        store::shift(tx, scope, placement.parent_id, shift, placement.id).await?;
        store::set_placement(tx, scope, placement.id, placement.parent_id, plan.target)
            .await
            .map_err(partial(scope, placement.id, "assign position"))?;

        tracing::debug!(
            entity = scope.entity(),
            id = %placement.id,
            from = placement.position,
            to = plan.target,
            "Reordered"
        );

        Ok(Placement {
            position: plan.target,
            ..placement
        })
    }

    /// Lock the entity's parent (plus `extra_parent`) and open a transaction
    ///
    /// The entity is read once without locks to learn its parent, then read
    /// again under the lock. If it changed parent in between, the attempt is
    /// retried.
    async fn lock_entity(
        &self,
        scope: Scope,
        id: Uuid,
        extra_parent: Option<Uuid>,
    ) -> Result<(ParentGuard, Transaction<'static, Sqlite>, Placement), ReindexError> {
        for attempt in 1..=LOOKUP_ATTEMPTS {
            let seen = {
                let mut conn = self.pool.acquire().await?;
                store::find_placement(&mut conn, scope, id)
                    .await?
                    .ok_or_else(|| ReindexError::not_found(scope.entity(), id))?
            };

            let mut parents = vec![seen.parent_id];
            parents.extend(extra_parent);
            let guard = self.locks.lock_many(&parents).await;

            let mut tx = store::begin_write(&self.pool).await?;
            let current = store::find_placement(&mut tx, scope, id)
                .await?
                .ok_or_else(|| ReindexError::not_found(scope.entity(), id))?;

            if current.parent_id == seen.parent_id {
                return Ok((guard, tx, current));
            }

            tracing::debug!(entity = scope.entity(), %id, attempt, "Parent changed before lock; retrying");
        }

        tracing::warn!(entity = scope.entity(), %id, "Giving up after repeated concurrent moves");
        Err(ReindexError::Conflict {
            entity: scope.entity(),
            id,
        })
    }
}
