#![forbid(unsafe_code)]

//! Ordered list with swipe-to-delete, drag-to-reorder and a detail view.
//!
//! [`ListEngine`] owns the sequence. Shells feed it pointer and drag input,
//! render from [`ListEngine::row_feedback`], and persist whatever
//! [`ListEngine::drain_events`] reports.

pub mod detail;
pub mod drag;
pub mod engine;
pub mod feedback;
pub mod item;
pub mod reorder;

pub use detail::ItemDetailCoordinator;
pub use drag::{DragSession, DragState, drop_index};
pub use engine::{EVENT_QUEUE_WARN_LEN, ListEngine, ListEvent, RowInteraction};
pub use feedback::{DELETE_LABEL, RowFeedback};
pub use item::{Item, ItemFields, ItemId};
pub use reorder::{NoOpReason, ReorderOutcome, apply_reorder, compute_reorder, plan_reorder};
