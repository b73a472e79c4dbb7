#![forbid(unsafe_code)]

//! Core: pointer input model and swipe gesture tracking.

pub mod event;
pub mod gesture;

pub use event::{Axis, PointerEvent, PointerPhase, PointerSource};
pub use gesture::{
    DEFAULT_THRESHOLD_RATIO, GestureTracker, SwipeConfig, SwipeDecision, SwipePhase,
    swipe_decision, swipe_progress,
};
