#![forbid(unsafe_code)]

//! Stable single-element moves within an ordered sequence.
//!
//! A reorder removes the element at `source` and reinserts it at
//! `destination` in the already-shortened sequence. Every other element keeps
//! its relative order. This is a move, not a swap.
//!
//! An absent destination (drag released outside any drop target) and
//! `source == destination` are identity transforms, reported as
//! [`ReorderOutcome::Unchanged`] rather than errors. Destinations past the end
//! clamp to the last position.

/// Why a reorder left the sequence untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoOpReason {
    /// The drag ended without a valid drop target.
    NoDestination,
    /// Source and (clamped) destination are the same slot.
    SameIndex,
    /// The source index does not address an element.
    SourceOutOfRange,
}

/// Result of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderOutcome {
    /// The element moved from `from` to `to`.
    Moved {
        /// Original index.
        from: usize,
        /// Final index (after clamping).
        to: usize,
    },
    /// Nothing changed.
    Unchanged(NoOpReason),
}

impl ReorderOutcome {
    /// Returns true if the sequence changed.
    #[must_use]
    pub const fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Resolve a reorder request against a sequence of `len` elements.
#[must_use]
pub fn plan_reorder(len: usize, source: usize, destination: Option<usize>) -> ReorderOutcome {
    let Some(destination) = destination else {
        return ReorderOutcome::Unchanged(NoOpReason::NoDestination);
    };
    if source >= len {
        return ReorderOutcome::Unchanged(NoOpReason::SourceOutOfRange);
    }
    // After removal there are `len - 1` elements, so `len - 1` is the last
    // valid insertion slot.
    let to = destination.min(len - 1);
    if to == source {
        return ReorderOutcome::Unchanged(NoOpReason::SameIndex);
    }
    ReorderOutcome::Moved { from: source, to }
}

/// Move an element in place.
pub fn apply_reorder<T>(
    items: &mut Vec<T>,
    source: usize,
    destination: Option<usize>,
) -> ReorderOutcome {
    let outcome = plan_reorder(items.len(), source, destination);
    if let ReorderOutcome::Moved { from, to } = outcome {
        let moved = items.remove(from);
        items.insert(to, moved);
    }
    outcome
}

/// Compute the reordered sequence without touching the input.
#[must_use]
pub fn compute_reorder<T: Clone>(
    items: &[T],
    source: usize,
    destination: Option<usize>,
) -> Vec<T> {
    let mut out = items.to_vec();
    apply_reorder(&mut out, source, destination);
    out
}
