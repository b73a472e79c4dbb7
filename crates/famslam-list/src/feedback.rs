#![forbid(unsafe_code)]

//! Per-row visual feedback, projected from gesture state.
//!
//! Nothing here is stored. A renderer asks the engine for a [`RowFeedback`]
//! every frame, so the overlay can never disagree with the tracker.

/// Label shown on the swipe overlay once a release would delete the row.
pub const DELETE_LABEL: &str = "Delete Item";

/// What a renderer needs to draw one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowFeedback {
    /// Horizontal translation of the swipe overlay. Never positive, never
    /// beyond one row extent.
    pub offset: f32,
    /// Overlay opacity in `[0, 1]`; equal to swipe progress.
    pub opacity: f32,
    /// Whether the "release to delete" label is visible.
    pub show_delete_label: bool,
    /// Whether the row is the source of an active drag.
    pub dragging: bool,
}

impl RowFeedback {
    /// Feedback for a row at rest.
    pub const REST: Self = Self {
        offset: 0.0,
        opacity: 0.0,
        show_delete_label: false,
        dragging: false,
    };

    /// Feedback for a row being swiped.
    ///
    /// `delta` is the travel toward the delete direction, `progress` the
    /// clamped progress and `past_threshold` whether a release would delete.
    #[must_use]
    pub fn swiping(delta: f32, row_extent: f32, progress: f32, past_threshold: bool) -> Self {
        let travel = if row_extent.is_finite() && row_extent > 0.0 {
            delta.clamp(0.0, row_extent)
        } else {
            0.0
        };
        Self {
            offset: -travel,
            opacity: progress.clamp(0.0, 1.0),
            show_delete_label: past_threshold,
            dragging: false,
        }
    }

    /// Feedback for the source row of a drag.
    #[must_use]
    pub fn dragged() -> Self {
        Self {
            dragging: true,
            ..Self::REST
        }
    }

    /// Label text to draw, if any.
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        self.show_delete_label.then_some(DELETE_LABEL)
    }

    /// Returns true if the row should be drawn exactly as at rest.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        *self == Self::REST
    }
}

impl Default for RowFeedback {
    fn default() -> Self {
        Self::REST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_has_no_overlay() {
        let fb = RowFeedback::default();
        assert!(fb.is_at_rest());
        assert_eq!(fb.label(), None);
    }

    #[test]
    fn swiping_offset_is_capped_at_extent() {
        let fb = RowFeedback::swiping(250.0, 100.0, 1.0, true);
        assert_eq!(fb.offset, -100.0);
        assert_eq!(fb.label(), Some(DELETE_LABEL));
    }

    #[test]
    fn backwards_swipe_does_not_slide_right() {
        let fb = RowFeedback::swiping(-30.0, 100.0, 0.0, false);
        assert_eq!(fb.offset, 0.0);
        assert_eq!(fb.opacity, 0.0);
    }

    #[test]
    fn dragged_row_is_flagged() {
        let fb = RowFeedback::dragged();
        assert!(fb.dragging);
        assert_eq!(fb.opacity, 0.0);
    }
}
