//! Shift Planning
//!
//! Pure arithmetic behind the reindexer. Each mutating operation is reduced
//! to at most one [`Shift`] per parent plus a final target position. Nothing
//! here touches storage, so the same plans drive both the SQL updates and the
//! in-memory models used in tests.

/// A contiguous range of sibling positions moved by `delta`
///
/// `from` is inclusive; `to` is inclusive when present and unbounded when
/// `None` (every sibling at or above `from`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub from: i64,
    pub to: Option<i64>,
    pub delta: i64,
}

impl Shift {
    /// Whether a sibling at `position` is affected by this shift
    pub fn contains(&self, position: i64) -> bool {
        position >= self.from && self.to.map_or(true, |to| position <= to)
    }

    /// Position of a sibling after the shift
    pub fn apply(&self, position: i64) -> i64 {
        if self.contains(position) {
            position + self.delta
        } else {
            position
        }
    }
}

/// Outcome of planning a same-parent reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderPlan {
    /// Final position of the moved entity, after clamping
    pub target: i64,
    /// Shift to apply to the other siblings; `None` means no-op
    pub shift: Option<Shift>,
}

/// Outcome of planning an insertion into a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPlan {
    /// Position the inserted entity takes, after clamping
    pub target: i64,
    /// Shift opening the slot; `None` when appending at the end
    pub shift: Option<Shift>,
}

/// Clamp `requested` into `[0, max]`; a negative `max` collapses to 0
pub fn clamp_position(requested: i64, max: i64) -> i64 {
    requested.clamp(0, max.max(0))
}

/// Plan moving an entity from `old` to `requested` among `sibling_count`
/// siblings (the count includes the entity itself)
pub fn plan_reorder(old: i64, requested: i64, sibling_count: i64) -> ReorderPlan {
    let target = clamp_position(requested, sibling_count - 1);

    let shift = if target > old {
        Some(Shift {
            from: old + 1,
            to: Some(target),
            delta: -1,
        })
    } else if target < old {
        Some(Shift {
            from: target,
            to: Some(old - 1),
            delta: 1,
        })
    } else {
        None
    };

    ReorderPlan { target, shift }
}

/// Plan closing the gap left by an entity removed from `old`
pub fn plan_remove(old: i64) -> Shift {
    Shift {
        from: old + 1,
        to: None,
        delta: -1,
    }
}

/// Plan inserting at `requested` into a parent that currently holds
/// `sibling_count` entities; appending at `sibling_count` is allowed
pub fn plan_insert(requested: i64, sibling_count: i64) -> InsertPlan {
    let target = clamp_position(requested, sibling_count);
    let shift = (target < sibling_count).then_some(Shift {
        from: target,
        to: None,
        delta: 1,
    });
    InsertPlan { target, shift }
}

/// Whether `positions` is exactly `{0, 1, ..., len-1}` in some order
pub fn is_dense(positions: &[i64]) -> bool {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, p)| *p == i as i64)
}
