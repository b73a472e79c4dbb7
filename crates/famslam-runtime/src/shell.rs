#![forbid(unsafe_code)]

//! Application shell.
//!
//! [`AppShell`] wires a [`ListEngine`] to a [`RecipeStore`]: the engine
//! decides what changed, the shell persists it. Persistence failures never
//! interrupt interaction; they are reported as lines in an [`ErrorPane`].
//!
//! # Failure Modes
//!
//! | Failure | Reported as |
//! |---------|-------------|
//! | Invalid page URL | `Error fetching page: …` |
//! | Store rejects a new recipe | `Error adding item: …` |
//! | Delete failed | `Error deleting item: …` (not when the id is already gone) |
//! | Update failed | `Error updating item: …` |
//! | Backend write failed | `Error saving items: …` |

use crate::config::EngineConfig;
use crate::draft::{ItemDraft, PageSnapshot};
use crate::store::{RecipeStore, StoreError, StoreResult};
use famslam_list::engine::{ListEngine, ListEvent};
use famslam_list::item::ItemId;

/// User-visible list of error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPane {
    messages: Vec<String>,
    visible: bool,
}

impl Default for ErrorPane {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            visible: true,
        }
    }
}

impl ErrorPane {
    /// Empty pane, shown once it has messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Does not change visibility.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(message = %message, "error reported to user");
        self.messages.push(message);
    }

    /// Messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Hide the pane. New messages are still kept.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Undo [`hide`](Self::hide).
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Whether the pane should be drawn: not hidden and not empty.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible && !self.messages.is_empty()
    }
}

/// Engine plus persistence plus error reporting.
#[derive(Debug)]
pub struct AppShell {
    engine: ListEngine,
    store: RecipeStore,
    errors: ErrorPane,
    config: EngineConfig,
}

impl AppShell {
    /// Load `store` and seed the engine with its recipes in stored order.
    pub fn new(mut store: RecipeStore, config: EngineConfig) -> StoreResult<Self> {
        store.load()?;
        let engine = ListEngine::with_config(store.list(), config.swipe);
        tracing::info!(
            backend = store.backend_name(),
            items = engine.len(),
            "shell started"
        );
        Ok(Self {
            engine,
            store,
            errors: ErrorPane::new(),
            config,
        })
    }

    /// The list engine.
    #[must_use]
    pub fn engine(&self) -> &ListEngine {
        &self.engine
    }

    /// Mutable engine access for routing input. Call [`sync`](Self::sync)
    /// afterwards to persist.
    pub fn engine_mut(&mut self) -> &mut ListEngine {
        &mut self.engine
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &RecipeStore {
        &self.store
    }

    /// Messages reported to the user.
    #[must_use]
    pub fn errors(&self) -> &ErrorPane {
        &self.errors
    }

    /// Mutable error pane, for dismissing messages.
    pub fn errors_mut(&mut self) -> &mut ErrorPane {
        &mut self.errors
    }

    /// Configuration the shell was opened with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a draft from a scraped page, reporting a bad URL to the pane.
    pub fn begin_draft(&mut self, page_url: &str, page: PageSnapshot) -> Option<ItemDraft> {
        match ItemDraft::from_page(page_url, page) {
            Ok(draft) => Some(draft),
            Err(e) => {
                self.errors.push(format!("Error fetching page: {e}"));
                None
            }
        }
    }

    /// Store a finished draft and append it to the list.
    pub fn add_item(&mut self, draft: ItemDraft) -> StoreResult<ItemId> {
        let item = match self.store.create(draft.into_new_recipe()) {
            Ok(item) => item,
            Err(e) => {
                self.errors.push(format!("Error adding item: {e}"));
                return Err(e);
            }
        };
        let id = item.id.clone();
        self.engine.append(item);
        self.flush();
        Ok(id)
    }

    /// Persist every mutation the engine has committed since the last sync.
    ///
    /// Returns the number of events applied to the store.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        for event in self.engine.drain_events() {
            let result = match event {
                ListEvent::OrderChanged { order, .. } => {
                    self.store.set_order(&order);
                    Ok(())
                }
                ListEvent::ItemDeleted { id, .. } => match self.store.delete(&id) {
                    Err(StoreError::NotFound(_)) => {
                        tracing::debug!(id = %id, "deleted item was not stored");
                        Ok(())
                    }
                    other => other.map_err(|e| format!("Error deleting item: {e}")),
                },
                ListEvent::ItemUpdated { id, fields } => self
                    .store
                    .update(&id, fields)
                    .map(|_| ())
                    .map_err(|e| format!("Error updating item: {e}")),
                ListEvent::FocusChanged { .. } => continue,
            };
            match result {
                Ok(()) => applied += 1,
                Err(message) => self.errors.push(message),
            }
        }
        self.flush();
        applied
    }

    fn flush(&mut self) {
        if let Err(e) = self.store.flush() {
            self.errors.push(format!("Error saving items: {e}"));
        }
    }
}
