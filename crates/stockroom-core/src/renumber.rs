//! # Display-Position IDs
//!
//! Item IDs double as the user-visible ordering, so they are assigned by hand
//! and compacted after deletes.
//!
//! ## Compaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Before delete:  1  2  3  4  5                                         │
//! │  deleteItems([2, 4])                                                   │
//! │  Survivors:      1     3     5                                         │
//! │                        │     │                                          │
//! │                        ▼     ▼                                          │
//! │  Plan:               3→2   5→3                                         │
//! │  After:          1  2  3                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Applying the plan front to back is collision-free: the k-th surviving ID
//! is always >= k, and every row that used to own ID k has either been
//! deleted or already moved lower.

/// One step of a renumber plan: move the row at `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reassignment {
    pub from: i64,
    pub to: i64,
}

/// ID for a newly inserted row: one past the current maximum, or 1.
pub fn next_item_id(max_existing: Option<i64>) -> i64 {
    max_existing.map_or(1, |max| max.max(0) + 1)
}

/// Computes the moves that make `ids_ascending` contiguous from 1.
///
/// `ids_ascending` must be sorted ascending with no duplicates (what
/// `SELECT id FROM items ORDER BY id` returns). Rows already at their
/// position are left out of the plan.
pub fn renumber_plan(ids_ascending: &[i64]) -> Vec<Reassignment> {
    ids_ascending
        .iter()
        .zip(1_i64..)
        .filter(|(from, to)| **from != *to)
        .map(|(from, to)| Reassignment { from: *from, to })
        .collect()
}

/// True when `ids` (in any order) is exactly `{1..=len}`.
pub fn is_contiguous(ids: &[i64]) -> bool {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.iter().zip(1_i64..).all(|(id, expected)| *id == expected)
}

/// Sorts and de-duplicates a delete set.
///
/// Duplicates in the request must not inflate the deleted count, and a
/// sorted set keeps the generated `IN (...)` lists stable in logs.
pub fn normalize_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(ids: &[i64], plan: &[Reassignment]) -> Vec<i64> {
        let mut rows = ids.to_vec();
        for step in plan {
            assert!(
                !rows.contains(&step.to),
                "step {:?} collides with a live id in {:?}",
                step,
                rows
            );
            let slot = rows.iter().position(|id| *id == step.from).unwrap();
            rows[slot] = step.to;
        }
        rows
    }

    #[test]
    fn test_next_item_id() {
        assert_eq!(next_item_id(None), 1);
        assert_eq!(next_item_id(Some(1)), 2);
        assert_eq!(next_item_id(Some(41)), 42);
    }

    #[test]
    fn test_plan_skips_rows_already_in_place() {
        assert!(renumber_plan(&[]).is_empty());
        assert!(renumber_plan(&[1, 2, 3]).is_empty());

        let plan = renumber_plan(&[1, 3, 5]);
        assert_eq!(
            plan,
            vec![
                Reassignment { from: 3, to: 2 },
                Reassignment { from: 5, to: 3 },
            ]
        );
    }

    #[test]
    fn test_plan_keeps_relative_order_and_compacts() {
        let survivors = [2, 3, 7, 8, 20];
        let after = apply(&survivors, &renumber_plan(&survivors));

        assert_eq!(after, vec![1, 2, 3, 4, 5]);
        assert!(is_contiguous(&after));
    }

    #[test]
    fn test_plan_never_collides() {
        // every subset of 1..=8 survives a sequential apply
        let all: Vec<i64> = (1..=8).collect();
        for mask in 0u32..(1 << all.len()) {
            let survivors: Vec<i64> = all
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, id)| *id)
                .collect();
            let after = apply(&survivors, &renumber_plan(&survivors));
            assert!(is_contiguous(&after));
        }
    }

    #[test]
    fn test_is_contiguous() {
        assert!(is_contiguous(&[]));
        assert!(is_contiguous(&[3, 1, 2]));
        assert!(!is_contiguous(&[1, 3]));
        assert!(!is_contiguous(&[2]));
    }

    #[test]
    fn test_normalize_ids() {
        assert_eq!(normalize_ids(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(normalize_ids(&[]).is_empty());
    }
}
