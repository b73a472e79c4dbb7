#![forbid(unsafe_code)]

//! Detail view coordination.
//!
//! The detail view shows one focused item at a time. It holds the focused
//! *id*, never a copy of the item, so the item it shows always reflects the
//! engine's current sequence.
//!
//! ```text
//! Closed ──open(id)──▶ Open(id) ──close / save / delete──▶ Closed
//! ```

use crate::engine::ListEngine;
use crate::item::{Item, ItemFields, ItemId};

/// Borrowing view over a [`ListEngine`] for the detail dialog.
///
/// Obtained from [`ListEngine::detail`].
#[derive(Debug)]
pub struct ItemDetailCoordinator<'a> {
    engine: &'a mut ListEngine,
}

impl<'a> ItemDetailCoordinator<'a> {
    pub(crate) fn new(engine: &'a mut ListEngine) -> Self {
        Self { engine }
    }

    /// Focus `id`. Returns false (and changes nothing) for an unknown id.
    pub fn open(&mut self, id: &ItemId) -> bool {
        if !self.engine.contains(id) {
            tracing::debug!(id = %id, "detail open on unknown id ignored");
            return false;
        }
        self.engine.set_focus(Some(id.clone()));
        true
    }

    /// Clear the focus. No-op if nothing is focused.
    pub fn close(&mut self) {
        self.engine.set_focus(None);
    }

    /// Replace the payload of `id` with `fields` and close.
    ///
    /// The replacement is applied verbatim. Returns false if `id` is gone.
    pub fn save(&mut self, id: &ItemId, fields: ItemFields) -> bool {
        let saved = self.engine.replace_fields(id, fields);
        self.close();
        saved
    }

    /// Delete `id` through the engine and close.
    pub fn request_delete(&mut self, id: &ItemId) -> bool {
        let deleted = self.engine.on_delete_gesture(id);
        self.close();
        deleted
    }

    /// The focused id.
    #[must_use]
    pub fn focused_id(&self) -> Option<&ItemId> {
        self.engine.focused_id()
    }

    /// The focused item as it currently is in the list.
    #[must_use]
    pub fn focused_item(&self) -> Option<&Item> {
        self.engine.focused_item()
    }

    /// Returns true if the detail view is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.engine.focused_id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{ListEngine, ListEvent};
    use crate::item::{Item, ItemFields, ItemId};

    fn engine() -> ListEngine {
        ListEngine::new(vec![
            Item::titled("a", "Apple pie"),
            Item::titled("b", "Bread"),
        ])
    }

    #[test]
    fn open_unknown_id_stays_closed() {
        let mut e = engine();
        assert!(!e.detail().open(&ItemId::from("nope")));
        assert!(!e.detail().is_open());
        assert!(e.pending_events().is_empty());
    }

    #[test]
    fn focused_item_tracks_live_sequence() {
        let mut e = engine();
        let b = ItemId::from("b");
        e.detail().open(&b);
        e.on_reorder_gesture(1, Some(0));
        assert_eq!(e.detail().focused_item().unwrap().fields.title, "Bread");
    }

    #[test]
    fn save_replaces_verbatim_and_closes() {
        let mut e = engine();
        let a = ItemId::from("a");
        let mut fields = ItemFields::titled("Apple crumble");
        fields.cook_time_mins = 45;
        fields.tags = vec!["#dessert".into()];

        let mut detail = e.detail();
        detail.open(&a);
        assert!(detail.save(&a, fields.clone()));
        assert!(!detail.is_open());

        assert_eq!(e.get(&a).unwrap().fields, fields);
        let events = e.drain_events();
        assert!(events.contains(&ListEvent::ItemUpdated {
            id: a.clone(),
            fields
        }));
        assert_eq!(e.ids(), vec![a, ItemId::from("b")]);
    }

    #[test]
    fn request_delete_removes_and_closes() {
        let mut e = engine();
        let a = ItemId::from("a");
        let mut detail = e.detail();
        detail.open(&a);
        assert!(detail.request_delete(&a));
        assert!(detail.focused_id().is_none());
        assert_eq!(e.ids(), vec![ItemId::from("b")]);
    }

    #[test]
    fn close_when_closed_emits_nothing() {
        let mut e = engine();
        e.detail().close();
        assert!(e.pending_events().is_empty());
    }

    #[test]
    fn save_of_deleted_item_is_ignored() {
        let mut e = engine();
        let a = ItemId::from("a");
        e.detail().open(&a);
        e.on_delete_gesture(&a);
        assert!(!e.detail().save(&a, ItemFields::titled("ghost")));
        assert_eq!(e.len(), 1);
    }
}
