#![forbid(unsafe_code)]

//! Swipe-to-delete gesture tracking.
//!
//! [`GestureTracker`] turns a stream of one-dimensional pointer positions for
//! a row into a [`SwipeDecision`] at release, plus a continuous progress value
//! for visual feedback while the gesture is in flight.
//!
//! # Invariants
//!
//! 1. At most one row is [`SwipePhase::Tracking`] at a time. A `begin` on a
//!    different row while one is tracking is ignored.
//! 2. `update`, `end` and `cancel` only act when the id matches the active
//!    row; mismatched ids never touch the active row's state.
//! 3. `end` always returns the tracker to [`SwipePhase::Idle`] when the id
//!    matches, whatever the decision.
//! 4. The decision is a pure function of `(delta, row_extent)`: delete iff
//!    `delta > row_extent * threshold_ratio` (exclusive).
//! 5. Progress is `clamp(delta / threshold, 0, 1)` and is `0` for any row
//!    that is not tracking.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Up with no matching down | Event from another row, late delivery | `Cancel`, no state change |
//! | Non-finite or non-positive extent | Row not laid out yet | `Cancel`, progress `0` |
//! | Non-finite position | Broken host coordinates | Sample ignored |

use crate::event::Axis;
use std::fmt;

/// Fraction of the row extent a swipe must travel before it deletes.
///
/// Earlier revisions of the list used `0.5` for some row modes; `0.75` is the
/// canonical value.
pub const DEFAULT_THRESHOLD_RATIO: f32 = 0.75;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for swipe recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Fraction of the row extent that must be exceeded to delete.
    /// Always within `(0, 1]`. Default: [`DEFAULT_THRESHOLD_RATIO`].
    pub threshold_ratio: f32,
    /// Axis the swipe is measured on. Default: horizontal.
    pub axis: Axis,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            axis: Axis::Horizontal,
        }
    }
}

impl SwipeConfig {
    /// Set the threshold ratio.
    ///
    /// Values outside `(0, 1]` (or NaN) fall back to
    /// [`DEFAULT_THRESHOLD_RATIO`].
    #[must_use]
    pub fn with_threshold_ratio(mut self, ratio: f32) -> Self {
        self.threshold_ratio = if ratio.is_finite() && ratio > 0.0 && ratio <= 1.0 {
            ratio
        } else {
            DEFAULT_THRESHOLD_RATIO
        };
        self
    }

    /// Set the measurement axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Distance a swipe must exceed on a row of the given extent.
    ///
    /// Returns `None` for extents that cannot be measured.
    #[must_use]
    pub fn threshold(&self, row_extent: f32) -> Option<f32> {
        if row_extent.is_finite() && row_extent > 0.0 {
            Some(row_extent * self.threshold_ratio)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Pure decision functions
// ---------------------------------------------------------------------------

/// Outcome of a released swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDecision {
    /// Travelled past the threshold: remove the row.
    Delete,
    /// Did not travel far enough, or the release was not for this row.
    Cancel,
}

impl SwipeDecision {
    /// Returns true for [`SwipeDecision::Delete`].
    #[must_use]
    pub const fn is_delete(self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// Decide a swipe from its travelled distance.
///
/// `delta` is positive toward the delete direction.
#[must_use]
pub fn swipe_decision(delta: f32, row_extent: f32, threshold_ratio: f32) -> SwipeDecision {
    let config = SwipeConfig::default().with_threshold_ratio(threshold_ratio);
    match config.threshold(row_extent) {
        Some(threshold) if delta > threshold => SwipeDecision::Delete,
        _ => SwipeDecision::Cancel,
    }
}

/// Visual progress of a swipe toward its threshold, clamped to `[0, 1]`.
#[must_use]
pub fn swipe_progress(delta: f32, threshold: f32) -> f32 {
    if threshold.is_nan() || threshold <= 0.0 || !delta.is_finite() {
        return 0.0;
    }
    (delta / threshold).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// GestureTracker
// ---------------------------------------------------------------------------

/// Phase of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwipePhase {
    /// No gesture in flight.
    #[default]
    Idle,
    /// A row is being swiped.
    Tracking,
}

#[derive(Debug, Clone)]
struct ActiveSwipe<K> {
    id: K,
    origin: f32,
    current: f32,
}

impl<K> ActiveSwipe<K> {
    fn delta(&self) -> f32 {
        self.origin - self.current
    }
}

/// Swipe state machine keyed by row id.
///
/// `K` is the row identifier; it only needs equality and a debug form for
/// diagnostics.
#[derive(Clone)]
pub struct GestureTracker<K> {
    config: SwipeConfig,
    active: Option<ActiveSwipe<K>>,
}

impl<K: fmt::Debug> fmt::Debug for GestureTracker<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureTracker")
            .field("config", &self.config)
            .field("active", &self.active.as_ref().map(|a| &a.id))
            .field("delta", &self.active.as_ref().map(ActiveSwipe::delta))
            .finish()
    }
}

impl<K> Default for GestureTracker<K> {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl<K> GestureTracker<K> {
    /// Create a tracker with the given configuration.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SwipePhase {
        if self.active.is_some() {
            SwipePhase::Tracking
        } else {
            SwipePhase::Idle
        }
    }

    /// Id of the row being tracked, if any.
    #[inline]
    #[must_use]
    pub fn active_id(&self) -> Option<&K> {
        self.active.as_ref().map(|a| &a.id)
    }

    /// Drop any in-flight gesture.
    pub fn reset(&mut self) {
        self.active = None;
    }
}

impl<K: Clone + PartialEq + fmt::Debug> GestureTracker<K> {
    /// Start tracking `id` at `position`.
    ///
    /// A second press on the tracked row restarts its gesture from
    /// `position`. Returns false (and changes nothing) if another row is
    /// already tracking or the position is not finite.
    pub fn begin(&mut self, id: K, position: f32) -> bool {
        if let Some(active) = &self.active
            && active.id != id
        {
            tracing::debug!(
                active = ?active.id,
                ignored = ?id,
                "swipe begin ignored, another row is tracking"
            );
            return false;
        }
        if !position.is_finite() {
            return false;
        }
        tracing::trace!(id = ?id, position, "swipe begin");
        self.active = Some(ActiveSwipe {
            id,
            origin: position,
            current: position,
        });
        true
    }

    /// Record a new position for `id`.
    ///
    /// Returns false if `id` is not the tracked row.
    pub fn update(&mut self, id: &K, position: f32) -> bool {
        match &mut self.active {
            Some(active) if active.id == *id && position.is_finite() => {
                active.current = position;
                true
            }
            _ => false,
        }
    }

    /// Resolve the gesture for `id` on a row of `row_extent`.
    ///
    /// Mismatched ids return [`SwipeDecision::Cancel`] and leave the active
    /// gesture alone. A matching id always returns the tracker to idle.
    pub fn end(&mut self, id: &K, row_extent: f32) -> SwipeDecision {
        let Some(active) = self.active.take_if(|a| a.id == *id) else {
            tracing::debug!(id = ?id, "swipe end without matching begin");
            return SwipeDecision::Cancel;
        };
        let delta = active.delta();
        let decision = swipe_decision(delta, row_extent, self.config.threshold_ratio);
        tracing::debug!(id = ?id, delta, row_extent, ?decision, "swipe resolved");
        decision
    }

    /// Discard the gesture for `id` without a decision.
    ///
    /// Returns true if a gesture was discarded.
    pub fn cancel(&mut self, id: &K) -> bool {
        self.active.take_if(|a| a.id == *id).is_some()
    }

    /// Returns true if `id` is the tracked row.
    #[must_use]
    pub fn is_tracking(&self, id: &K) -> bool {
        self.active.as_ref().is_some_and(|a| a.id == *id)
    }

    /// Signed travel of `id` toward the delete direction, if tracking.
    #[must_use]
    pub fn delta(&self, id: &K) -> Option<f32> {
        self.active
            .as_ref()
            .filter(|a| a.id == *id)
            .map(ActiveSwipe::delta)
    }

    /// Progress of `id`'s swipe toward the threshold, in `[0, 1]`.
    ///
    /// Pure projection of tracker state; `0` when `id` is not tracking.
    #[must_use]
    pub fn progress(&self, id: &K, row_extent: f32) -> f32 {
        match (self.delta(id), self.config.threshold(row_extent)) {
            (Some(delta), Some(threshold)) => swipe_progress(delta, threshold),
            _ => 0.0,
        }
    }

    /// Returns true if releasing `id` now would delete it.
    #[must_use]
    pub fn past_threshold(&self, id: &K, row_extent: f32) -> bool {
        self.delta(id).is_some_and(|delta| {
            swipe_decision(delta, row_extent, self.config.threshold_ratio).is_delete()
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
