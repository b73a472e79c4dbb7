#![forbid(unsafe_code)]

//! Canonical pointer input types.
//!
//! Mouse and touch input are normalized into a single [`PointerEvent`] so the
//! gesture machinery never needs to know which device produced a sample.
//!
//! # Design Notes
//!
//! - Coordinates are `f32` in the host's layout units (CSS pixels, cells, ...).
//! - Only the first touch point of a multi-touch sample is forwarded; the
//!   shell is responsible for choosing it.
//! - `Cancel` is emitted when the platform aborts a touch sequence (focus
//!   loss, system gesture). It never resolves to a mutation.

/// Lifecycle phase of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerPhase {
    /// Button pressed or finger placed.
    Down,
    /// Position changed while pressed.
    Move,
    /// Button released or finger lifted.
    Up,
    /// Sequence aborted by the platform.
    Cancel,
}

/// Device that produced a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerSource {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Touch screen.
    Touch,
}

/// Axis along which a one-dimensional gesture is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Left/right. Swipe-to-delete uses this axis.
    #[default]
    Horizontal,
    /// Up/down. Drag reordering uses this axis.
    Vertical,
}

impl Axis {
    /// Project a 2-D point onto this axis.
    #[inline]
    #[must_use]
    pub const fn project(self, x: f32, y: f32) -> f32 {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }

    /// Parse a lowercase axis name (`"horizontal"` / `"vertical"`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "x" => Some(Self::Horizontal),
            "vertical" | "y" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// A normalized pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// Lifecycle phase.
    pub phase: PointerPhase,
    /// Producing device.
    pub source: PointerSource,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, source: PointerSource, x: f32, y: f32) -> Self {
        Self {
            phase,
            source,
            x,
            y,
        }
    }

    /// Create a mouse event.
    #[must_use]
    pub const fn mouse(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self::new(phase, PointerSource::Mouse, x, y)
    }

    /// Create a touch event.
    #[must_use]
    pub const fn touch(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self::new(phase, PointerSource::Touch, x, y)
    }

    /// Position of this sample projected onto `axis`.
    #[inline]
    #[must_use]
    pub const fn position_on(&self, axis: Axis) -> f32 {
        axis.project(self.x, self.y)
    }

    /// Returns true if this sample ends a pointer sequence.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_projection() {
        assert_eq!(Axis::Horizontal.project(3.0, 7.0), 3.0);
        assert_eq!(Axis::Vertical.project(3.0, 7.0), 7.0);
    }

    #[test]
    fn axis_parse_accepts_aliases() {
        assert_eq!(Axis::parse("Horizontal"), Some(Axis::Horizontal));
        assert_eq!(Axis::parse(" y "), Some(Axis::Vertical));
        assert_eq!(Axis::parse("diagonal"), None);
    }

    #[test]
    fn constructors_set_source() {
        let m = PointerEvent::mouse(PointerPhase::Down, 1.0, 2.0);
        let t = PointerEvent::touch(PointerPhase::Move, 1.0, 2.0);
        assert_eq!(m.source, PointerSource::Mouse);
        assert_eq!(t.source, PointerSource::Touch);
        assert_eq!(t.position_on(Axis::Vertical), 2.0);
    }

    #[test]
    fn terminal_phases() {
        assert!(PointerEvent::mouse(PointerPhase::Up, 0.0, 0.0).is_terminal());
        assert!(PointerEvent::touch(PointerPhase::Cancel, 0.0, 0.0).is_terminal());
        assert!(!PointerEvent::mouse(PointerPhase::Move, 0.0, 0.0).is_terminal());
    }
}
