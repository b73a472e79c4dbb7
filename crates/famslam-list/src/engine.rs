#![forbid(unsafe_code)]

//! The ordered list interaction engine.
//!
//! [`ListEngine`] is the single owner of the canonical item order and the only
//! place where reorder and delete mutations are committed. It composes a
//! [`GestureTracker`] for swipe-to-delete, a [`DragSession`] for
//! drag-to-reorder, and the detail focus reference.
//!
//! # State Machines
//!
//! ```text
//! swipe:  Stable ──down──▶ RowTracking ──up, delta > threshold──▶ Stable (row removed)
//!                                      └─up, delta ≤ threshold──▶ Stable (unchanged)
//! drag:   Stable ──handle──▶ Dragging ──drop on slot──▶ Stable (new order)
//!                                     └─drop on nothing─▶ Stable (unchanged)
//! ```
//!
//! The two machines are mutually exclusive per row (whichever claims the row
//! first wins) but independent across rows.
//!
//! # Invariants
//!
//! 1. The sequence never contains duplicate ids.
//! 2. Item payloads are never altered except by a verbatim replacement from
//!    the detail view.
//! 3. Every committed mutation queues exactly one [`ListEvent`].
//! 4. No public operation panics or returns an error; malformed or stale
//!    input degrades to a no-op.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Pointer on unknown row | Row removed, stale hit-test | Ignored |
//! | Delete of unknown id | Raced with an external removal | Ignored |
//! | Focus on deleted row | Row deleted while in detail view | Focus cleared |
//! | Drop without destination | Released outside the list | Order unchanged |
//! | Queue never drained | Owner skips draining | Kept, warns past [`EVENT_QUEUE_WARN_LEN`] |
//!
//! The owner must call [`ListEngine::drain_events`] after every batch of
//! input (once per frame). Events are never dropped: a lost `ItemDeleted`
//! would leave the store out of step with the list.

use crate::detail::ItemDetailCoordinator;
use crate::drag::{DragSession, DragState};
use crate::feedback::RowFeedback;
use crate::item::{Item, ItemFields, ItemId};
use crate::reorder::{NoOpReason, ReorderOutcome, apply_reorder};
use famslam_core::event::{PointerEvent, PointerPhase};
use famslam_core::gesture::{GestureTracker, SwipeConfig, SwipeDecision};
use std::collections::HashSet;

/// Queue length past which a `warn` reports that events are not drained.
pub const EVENT_QUEUE_WARN_LEN: usize = 1024;

/// Notification queued for the owning application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// The order changed. `order` is the complete new order.
    OrderChanged {
        /// Ids in their new order.
        order: Vec<ItemId>,
        /// Index the moved row left.
        from: usize,
        /// Index the moved row landed on.
        to: usize,
    },
    /// A row was removed.
    ItemDeleted {
        /// Removed id.
        id: ItemId,
        /// Index it occupied.
        index: usize,
    },
    /// A row's payload was replaced from the detail view.
    ItemUpdated {
        /// Updated id.
        id: ItemId,
        /// The replacement payload, verbatim.
        fields: ItemFields,
    },
    /// The detail focus moved.
    FocusChanged {
        /// Newly focused id, or `None` when the detail view closed.
        focused: Option<ItemId>,
    },
}

/// Which gesture currently owns a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowInteraction {
    /// No gesture.
    #[default]
    Idle,
    /// Being swiped.
    Swiping,
    /// Being dragged by its handle.
    Dragging,
}

/// Owner of the canonical ordered sequence.
#[derive(Debug, Clone)]
pub struct ListEngine {
    items: Vec<Item>,
    swipe: GestureTracker<ItemId>,
    drag: Option<DragSession>,
    focus: Option<ItemId>,
    events: Vec<ListEvent>,
}

impl Default for ListEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ListEngine {
    /// Create an engine over `items` with the default swipe configuration.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self::with_config(items, SwipeConfig::default())
    }

    /// Create an engine with a custom swipe configuration.
    ///
    /// Duplicate ids keep their first occurrence.
    #[must_use]
    pub fn with_config(items: impl IntoIterator<Item = Item>, config: SwipeConfig) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    tracing::warn!(id = %item.id, "dropping duplicate item id");
                }
                fresh
            })
            .collect();
        Self {
            items,
            swipe: GestureTracker::new(config),
            drag: None,
            focus: None,
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Items in display order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Position of `id`, if present.
    #[must_use]
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == *id)
    }

    /// Returns true if `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.index_of(id).is_some()
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Swipe configuration in effect.
    #[must_use]
    pub fn swipe_config(&self) -> &SwipeConfig {
        self.swipe.config()
    }

    /// Which gesture owns `id` right now.
    #[must_use]
    pub fn row_interaction(&self, id: &ItemId) -> RowInteraction {
        if self.drag.as_ref().is_some_and(|d| d.id() == id) {
            RowInteraction::Dragging
        } else if self.swipe.is_tracking(id) {
            RowInteraction::Swiping
        } else {
            RowInteraction::Idle
        }
    }

    /// Visual feedback for `id` on a row of `row_extent`.
    ///
    /// Derived from gesture state on every call.
    #[must_use]
    pub fn row_feedback(&self, id: &ItemId, row_extent: f32) -> RowFeedback {
        match self.row_interaction(id) {
            RowInteraction::Idle => RowFeedback::REST,
            RowInteraction::Dragging => RowFeedback::dragged(),
            RowInteraction::Swiping => {
                let delta = self.swipe.delta(id).unwrap_or(0.0);
                RowFeedback::swiping(
                    delta,
                    row_extent,
                    self.swipe.progress(id, row_extent),
                    self.swipe.past_threshold(id, row_extent),
                )
            }
        }
    }

    /// Swipe progress of `id` in `[0, 1]`.
    #[must_use]
    pub fn swipe_progress(&self, id: &ItemId, row_extent: f32) -> f32 {
        self.swipe.progress(id, row_extent)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add an item at the end of the list.
    ///
    /// Returns false if the id is already present.
    pub fn append(&mut self, item: Item) -> bool {
        if self.contains(&item.id) {
            tracing::warn!(id = %item.id, "refusing to append duplicate item id");
            return false;
        }
        tracing::debug!(id = %item.id, index = self.items.len(), "item appended");
        self.items.push(item);
        true
    }

    /// Move the row at `source` to `destination`.
    ///
    /// This is the only path that changes order.
    pub fn on_reorder_gesture(
        &mut self,
        source: usize,
        destination: Option<usize>,
    ) -> ReorderOutcome {
        if source >= self.items.len() {
            tracing::debug!(source, len = self.items.len(), "reorder source out of range");
            return ReorderOutcome::Unchanged(NoOpReason::SourceOutOfRange);
        }
        let outcome = apply_reorder(&mut self.items, source, destination);
        match outcome {
            ReorderOutcome::Moved { from, to } => {
                tracing::info!(from, to, "list reordered");
                self.push_event(ListEvent::OrderChanged {
                    order: self.ids(),
                    from,
                    to,
                });
            }
            ReorderOutcome::Unchanged(reason) => {
                tracing::debug!(source, ?destination, ?reason, "reorder was a no-op");
            }
        }
        outcome
    }

    /// Remove `id` from the list.
    ///
    /// Returns false if `id` was not present. Closes the detail focus if it
    /// was on `id` and discards any gesture in flight on that row.
    pub fn on_delete_gesture(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(id = %id, "delete of unknown id ignored");
            return false;
        };
        self.items.remove(index);
        self.swipe.cancel(id);
        if self.drag.as_ref().is_some_and(|d| d.id() == id) {
            self.drag = None;
        }
        tracing::info!(id = %id, index, "item deleted");
        self.push_event(ListEvent::ItemDeleted {
            id: id.clone(),
            index,
        });
        if self.focus.as_ref() == Some(id) {
            self.set_focus(None);
        }
        true
    }

    /// Route a pointer sample on row `id` to the swipe tracker.
    ///
    /// Returns the decision when the sample resolved a gesture on this row.
    /// A `Delete` decision has already been applied when this returns.
    pub fn on_row_pointer_event(
        &mut self,
        id: &ItemId,
        event: &PointerEvent,
        row_extent: f32,
    ) -> Option<SwipeDecision> {
        if !self.contains(id) {
            tracing::debug!(
                id = %id,
                phase = ?event.phase,
                "pointer event for unknown row ignored"
            );
            return None;
        }
        let position = event.position_on(self.swipe.config().axis);
        match event.phase {
            PointerPhase::Down => {
                if self.row_interaction(id) == RowInteraction::Dragging {
                    tracing::debug!(id = %id, "swipe refused, row is being dragged");
                } else {
                    self.swipe.begin(id.clone(), position);
                }
                None
            }
            PointerPhase::Move => {
                self.swipe.update(id, position);
                None
            }
            PointerPhase::Up => {
                if !self.swipe.is_tracking(id) {
                    return None;
                }
                self.swipe.update(id, position);
                let decision = self.swipe.end(id, row_extent);
                if decision.is_delete() {
                    self.on_delete_gesture(id);
                }
                Some(decision)
            }
            PointerPhase::Cancel => self.swipe.cancel(id).then_some(SwipeDecision::Cancel),
        }
    }

    // -----------------------------------------------------------------------
    // Drag
    // -----------------------------------------------------------------------

    /// Begin dragging `id` by its handle.
    ///
    /// Refused if another drag is active, the row is being swiped, or the id
    /// is unknown.
    pub fn on_drag_start(&mut self, id: &ItemId) -> bool {
        if let Some(active) = &self.drag {
            tracing::debug!(
                active = %active.id(),
                ignored = %id,
                "drag start ignored, drag in progress"
            );
            return false;
        }
        if self.swipe.is_tracking(id) {
            tracing::debug!(id = %id, "drag refused, row is being swiped");
            return false;
        }
        let Some(index) = self.index_of(id) else {
            tracing::debug!(id = %id, "drag start on unknown row ignored");
            return false;
        };
        self.drag = Some(DragSession::new(id.clone(), index));
        true
    }

    /// Follow the pointer at `offset` from the list top during a drag.
    ///
    /// The slot moves once the pointer crosses a neighbouring row's
    /// midpoint. Returns the slot the row would land in, if any.
    pub fn on_drag_move(&mut self, id: &ItemId, offset: f32, row_extent: f32) -> Option<usize> {
        let len = self.items.len();
        let source = self.index_of(id)?;
        let session = self.drag.as_mut().filter(|d| d.id() == id)?;
        session.track_offset(offset, row_extent, len, source);
        session.state().destination_index
    }

    /// Set the drop slot directly, for shells that hit-test themselves.
    ///
    /// Returns false if `id` is not being dragged.
    pub fn set_drag_destination(&mut self, id: &ItemId, destination: Option<usize>) -> bool {
        match self.drag.as_mut().filter(|d| d.id() == id) {
            Some(session) => {
                session.set_destination(destination);
                true
            }
            None => false,
        }
    }

    /// Current drag bookkeeping, if a drag is active.
    #[must_use]
    pub fn drag_state(&self) -> Option<DragState> {
        self.drag.as_ref().map(DragSession::state)
    }

    /// Id of the dragged row, if any.
    #[must_use]
    pub fn dragging_id(&self) -> Option<&ItemId> {
        self.drag.as_ref().map(DragSession::id)
    }

    /// Drop the dragged row `id` on its current slot.
    ///
    /// Consumes the drag. The source index is re-resolved from the id so a
    /// row deleted mid-drag cannot move the wrong item.
    pub fn on_drop(&mut self, id: &ItemId) -> ReorderOutcome {
        let Some(session) = self.drag.take_if(|d| d.id() == id) else {
            tracing::debug!(id = %id, "drop without matching drag ignored");
            return ReorderOutcome::Unchanged(NoOpReason::NoDestination);
        };
        let (id, state) = session.finish();
        let Some(source) = self.index_of(&id) else {
            return ReorderOutcome::Unchanged(NoOpReason::SourceOutOfRange);
        };
        self.on_reorder_gesture(source, state.destination_index)
    }

    /// Abandon the drag of `id` without reordering.
    pub fn cancel_drag(&mut self, id: &ItemId) -> bool {
        self.drag.take_if(|d| d.id() == id).is_some()
    }

    // -----------------------------------------------------------------------
    // Detail focus
    // -----------------------------------------------------------------------

    /// Coordinator for the detail view.
    pub fn detail(&mut self) -> ItemDetailCoordinator<'_> {
        ItemDetailCoordinator::new(self)
    }

    /// Id of the focused item, if any.
    #[must_use]
    pub fn focused_id(&self) -> Option<&ItemId> {
        self.focus.as_ref()
    }

    /// The focused item, resolved against the current sequence.
    #[must_use]
    pub fn focused_item(&self) -> Option<&Item> {
        self.focus.as_ref().and_then(|id| self.get(id))
    }

    pub(crate) fn set_focus(&mut self, focus: Option<ItemId>) {
        if self.focus == focus {
            return;
        }
        self.focus = focus.clone();
        self.push_event(ListEvent::FocusChanged { focused: focus });
    }

    pub(crate) fn replace_fields(&mut self, id: &ItemId, fields: ItemFields) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == *id) else {
            tracing::debug!(id = %id, "update of unknown id ignored");
            return false;
        };
        item.fields = fields.clone();
        tracing::info!(id = %id, "item updated");
        self.push_event(ListEvent::ItemUpdated {
            id: id.clone(),
            fields,
        });
        true
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Events queued since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[ListEvent] {
        &self.events
    }

    /// Take all queued events, oldest first.
    ///
    /// Call after every batch of input; the queue is unbounded.
    pub fn drain_events(&mut self) -> Vec<ListEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: ListEvent) {
        self.events.push(event);
        if self.events.len() == EVENT_QUEUE_WARN_LEN + 1 {
            tracing::warn!(
                pending = self.events.len(),
                "list events are not being drained"
            );
        }
    }
}
