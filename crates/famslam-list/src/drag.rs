#![forbid(unsafe_code)]

//! Drag-to-reorder protocol.
//!
//! A drag begins when a row's handle is pressed, follows the pointer as it
//! crosses other rows' midpoints, and is consumed exactly once at drop to
//! produce a reorder request.
//!
//! # Invariants
//!
//! 1. A drag is well-formed: one start, zero or more moves, then exactly one
//!    of drop or cancel.
//! 2. [`DragState::destination_index`] is `None` whenever the pointer is
//!    outside every row; dropping then is a no-op.
//! 3. The session remembers the dragged row's id so the source index can be
//!    re-resolved at drop if the list changed during the drag.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Drop outside the list | Pointer released over nothing | No reorder |
//! | Dragged row deleted mid-drag | Concurrent delete | No reorder |
//! | Zero or non-finite row extent | Layout not ready | Destination cleared |

use crate::item::ItemId;

/// Index bookkeeping of an in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragState {
    /// Index of the dragged row when the drag started.
    pub source_index: usize,
    /// Slot the row would land in if dropped now, or `None` for "no target".
    pub destination_index: Option<usize>,
}

impl DragState {
    /// Create state for a drag starting at `source_index`.
    ///
    /// The initial destination is the source slot itself.
    #[must_use]
    pub const fn new(source_index: usize) -> Self {
        Self {
            source_index,
            destination_index: Some(source_index),
        }
    }

    /// Returns true if dropping now would move the row.
    #[must_use]
    pub fn would_move(&self) -> bool {
        self.destination_index
            .is_some_and(|dest| dest != self.source_index)
    }
}

/// Slot a row dragged from `source` lands in with the pointer at `offset`
/// from the top of the list.
///
/// Rows are `row_extent` tall. The destination moves past row `j` once the
/// pointer crosses `j`'s midpoint, `(j + 0.5) * row_extent`: downward for
/// rows below the source, upward for rows above it. Offsets outside
/// `[0, row_extent * item_count)` have no drop target.
#[must_use]
pub fn drop_index(
    offset: f32,
    row_extent: f32,
    item_count: usize,
    source: usize,
) -> Option<usize> {
    if item_count == 0 || !offset.is_finite() || !row_extent.is_finite() || row_extent <= 0.0 {
        return None;
    }
    if offset < 0.0 || offset >= row_extent * item_count as f32 {
        return None;
    }
    let source = source.min(item_count - 1);
    let midpoint = |row: usize| (row as f32 + 0.5) * row_extent;
    let below = (source + 1..item_count)
        .take_while(|&row| offset >= midpoint(row))
        .last();
    let above = (0..source).rev().take_while(|&row| offset < midpoint(row)).last();
    Some(below.or(above).unwrap_or(source))
}

/// An active drag of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    id: ItemId,
    state: DragState,
}

impl DragSession {
    /// Start a drag of `id`, currently at `source_index`.
    #[must_use]
    pub fn new(id: ItemId, source_index: usize) -> Self {
        Self {
            id,
            state: DragState::new(source_index),
        }
    }

    /// Id of the dragged row.
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Current index bookkeeping.
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Point the drag at an explicit slot (or at nothing).
    pub fn set_destination(&mut self, destination: Option<usize>) {
        self.state.destination_index = destination;
    }

    /// Point the drag at the slot under `offset`, measured from the row's
    /// current index `source`.
    pub fn track_offset(
        &mut self,
        offset: f32,
        row_extent: f32,
        item_count: usize,
        source: usize,
    ) {
        self.state.destination_index = drop_index(offset, row_extent, item_count, source);
    }

    /// Consume the session, yielding its final state.
    #[must_use]
    pub fn finish(self) -> (ItemId, DragState) {
        (self.id, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_targets_source() {
        let state = DragState::new(2);
        assert_eq!(state.destination_index, Some(2));
        assert!(!state.would_move());
    }

    #[test]
    fn drop_index_moves_down_at_neighbour_midpoints() {
        assert_eq!(drop_index(0.0, 40.0, 3, 0), Some(0));
        assert_eq!(drop_index(45.0, 40.0, 3, 0), Some(0));
        assert_eq!(drop_index(59.9, 40.0, 3, 0), Some(0));
        assert_eq!(drop_index(60.0, 40.0, 3, 0), Some(1));
        assert_eq!(drop_index(61.0, 40.0, 3, 0), Some(1));
        assert_eq!(drop_index(99.0, 40.0, 3, 0), Some(1));
        assert_eq!(drop_index(100.0, 40.0, 3, 0), Some(2));
    }

    #[test]
    fn drop_index_moves_up_at_neighbour_midpoints() {
        assert_eq!(drop_index(119.0, 40.0, 3, 2), Some(2));
        assert_eq!(drop_index(60.0, 40.0, 3, 2), Some(2));
        assert_eq!(drop_index(59.9, 40.0, 3, 2), Some(1));
        assert_eq!(drop_index(20.0, 40.0, 3, 2), Some(1));
        assert_eq!(drop_index(19.9, 40.0, 3, 2), Some(0));
    }

    #[test]
    fn drop_index_from_middle_row() {
        assert_eq!(drop_index(45.0, 40.0, 3, 1), Some(1));
        assert_eq!(drop_index(10.0, 40.0, 3, 1), Some(0));
        assert_eq!(drop_index(110.0, 40.0, 3, 1), Some(2));
    }

    #[test]
    fn drop_index_clamps_stale_source() {
        assert_eq!(drop_index(10.0, 40.0, 3, 9), Some(0));
        assert_eq!(drop_index(110.0, 40.0, 3, 9), Some(2));
    }

    #[test]
    fn drop_index_outside_list_is_none() {
        assert_eq!(drop_index(-1.0, 40.0, 3, 0), None);
        assert_eq!(drop_index(120.0, 40.0, 3, 0), None);
        assert_eq!(drop_index(10.0, 40.0, 0, 0), None);
    }

    #[test]
    fn drop_index_rejects_bad_geometry() {
        assert_eq!(drop_index(10.0, 0.0, 3, 0), None);
        assert_eq!(drop_index(f32::NAN, 40.0, 3, 0), None);
        assert_eq!(drop_index(10.0, f32::INFINITY, 3, 0), None);
    }

    #[test]
    fn session_tracks_offset() {
        let mut session = DragSession::new(ItemId::from("a"), 0);
        session.track_offset(95.0, 40.0, 3, 0);
        assert_eq!(session.state().destination_index, Some(1));
        session.track_offset(101.0, 40.0, 3, 0);
        assert_eq!(session.state().destination_index, Some(2));
        assert!(session.state().would_move());

        session.track_offset(500.0, 40.0, 3, 0);
        assert_eq!(session.state().destination_index, None);

        let (id, state) = session.finish();
        assert_eq!(id.as_str(), "a");
        assert_eq!(state.source_index, 0);
    }
}
