#![forbid(unsafe_code)]

//! Recipe persistence.
//!
//! [`RecipeStore`] is the CRUD surface behind the list. It keeps an in-memory
//! copy of every recipe plus the user's order and delegates durability to a
//! pluggable [`StorageBackend`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       RecipeStore                             │
//! │   - id → fields map and display order                         │
//! │   - create / update / delete / set_order                      │
//! │   - dirty tracking, flush on demand                           │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     StorageBackend                            │
//! │   - MemoryStorage: in-memory (testing, ephemeral)             │
//! │   - FileStorage: JSON file (requires state-persistence)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Every id in the order has a recipe and every recipe appears in the
//!    order exactly once. Loaded snapshots are repaired to satisfy this.
//! 2. File writes are atomic (write to `*.tmp`, sync, rename).
//! 3. `flush` only touches the backend when something changed.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StoreError::Io` | File I/O failure | Returned, cache unaffected |
//! | `StoreError::Serialization` | Malformed JSON | Returned from `load` |
//! | `StoreError::Corruption` | Unknown format version, poisoned lock | Returned |
//! | `StoreError::NotFound` | Update or delete of an absent id | Returned, nothing changes |
//! | `StoreError::Invalid` | Missing title or recipe text | Returned from `create` |
//! | Dangling order entry | Hand-edited file | Dropped with a warning |

use famslam_list::item::{Item, ItemFields, ItemId};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::RwLock;

// ─────────────────────────────────────────────────────────────────────────────
// Error Types
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from recipe storage.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error during file operations.
    Io(std::io::Error),
    /// JSON encode or decode failure.
    #[cfg(feature = "state-persistence")]
    Serialization(String),
    /// Stored data is unusable.
    Corruption(String),
    /// No recipe with this id.
    NotFound(ItemId),
    /// The request is missing required data.
    Invalid(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "state-persistence")]
            StoreError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            StoreError::Corruption(msg) => write!(f, "storage corruption: {msg}"),
            StoreError::NotFound(id) => write!(f, "recipe not found: {id}"),
            StoreError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Everything a backend persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Display order.
    pub order: Vec<ItemId>,
    /// Payload by id.
    pub recipes: BTreeMap<ItemId, ItemFields>,
}

impl StoreSnapshot {
    /// Repair order/recipe mismatches in place.
    ///
    /// Duplicate and dangling order entries are dropped. Recipes missing from
    /// the order are appended in id order. Returns the number of repairs.
    pub fn normalize(&mut self) -> usize {
        let mut repairs = 0;
        let mut seen = HashSet::new();
        let recipes = &self.recipes;
        self.order.retain(|id| {
            let keep = recipes.contains_key(id) && seen.insert(id.clone());
            if !keep {
                tracing::warn!(id = %id, "dropping dangling or duplicate order entry");
                repairs += 1;
            }
            keep
        });
        for id in self.recipes.keys() {
            if !seen.contains(id) {
                tracing::warn!(id = %id, "recipe missing from order, appending");
                self.order.push(id.clone());
                repairs += 1;
            }
        }
        repairs
    }

    /// Recipes in display order.
    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        self.order
            .iter()
            .filter_map(|id| {
                self.recipes
                    .get(id)
                    .map(|fields| Item::new(id.clone(), fields.clone()))
            })
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Storage Backend Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Pluggable durable storage for a [`RecipeStore`].
///
/// Implementations must be `Send + Sync` so a store can be flushed from any
/// thread.
pub trait StorageBackend: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Load the stored snapshot. Empty on first run.
    fn load(&self) -> StoreResult<StoreSnapshot>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &StoreSnapshot) -> StoreResult<()>;

    /// Remove everything stored.
    fn clear(&self) -> StoreResult<()>;

    /// Check if the backend can currently be written.
    fn is_available(&self) -> bool {
        true
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memory Storage (always available)
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory backend. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<StoreSnapshot>,
}

impl MemoryStorage {
    /// Create an empty memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create memory storage holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load(&self) -> StoreResult<StoreSnapshot> {
        let guard = self
            .data
            .read()
            .map_err(|_| StoreError::Corruption("lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &StoreSnapshot) -> StoreResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StoreError::Corruption("lock poisoned".into()))?;
        *guard = snapshot.clone();
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StoreError::Corruption("lock poisoned".into()))?;
        *guard = StoreSnapshot::default();
        Ok(())
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.recipes.len()).unwrap_or(0);
        f.debug_struct("MemoryStorage")
            .field("recipes", &count)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Storage (requires state-persistence feature)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "state-persistence")]
mod file_storage {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    #[derive(Serialize, Deserialize)]
    struct StoreFile {
        format_version: u32,
        #[serde(default)]
        order: Vec<ItemId>,
        #[serde(default)]
        recipes: BTreeMap<ItemId, ItemFields>,
    }

    impl StoreFile {
        const FORMAT_VERSION: u32 = 1;
    }

    /// JSON file backend.
    ///
    /// # File Format
    ///
    /// ```json
    /// {
    ///   "format_version": 1,
    ///   "order": ["5f0c…", "a81d…"],
    ///   "recipes": {
    ///     "5f0c…": { "title": "Pancakes", "imageUrl": "…", "cookTime": 20,
    ///                "tags": ["#breakfast"], "recipeText": "…" }
    ///   }
    /// }
    /// ```
    ///
    /// Writes go to `{path}.tmp`, are synced, then renamed over `{path}`.
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// Create a file storage at `path`. The file is created on first save.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        /// Storage at `$XDG_STATE_HOME/famslam/recipes.json`.
        #[must_use]
        pub fn default_location() -> Self {
            Self::new(default_path())
        }

        /// Path of the JSON file.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone();
            tmp.set_extension("json.tmp");
            tmp
        }
    }

    /// Default recipe file location.
    ///
    /// `$XDG_STATE_HOME`, then `~/.local/state`, then the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let base = if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
            PathBuf::from(state_home)
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home).join(".local").join("state")
        } else {
            PathBuf::from(".")
        };
        base.join("famslam").join("recipes.json")
    }

    impl StorageBackend for FileStorage {
        fn name(&self) -> &str {
            "FileStorage"
        }

        fn load(&self) -> StoreResult<StoreSnapshot> {
            if !self.path.exists() {
                return Ok(StoreSnapshot::default());
            }

            let reader = BufReader::new(File::open(&self.path)?);
            let file: StoreFile = serde_json::from_reader(reader).map_err(|e| {
                StoreError::Serialization(format!("failed to parse recipe file: {e}"))
            })?;

            if file.format_version != StoreFile::FORMAT_VERSION {
                return Err(StoreError::Corruption(format!(
                    "unsupported format version {} (expected {})",
                    file.format_version,
                    StoreFile::FORMAT_VERSION
                )));
            }

            Ok(StoreSnapshot {
                order: file.order,
                recipes: file.recipes,
            })
        }

        fn save(&self, snapshot: &StoreSnapshot) -> StoreResult<()> {
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }

            let file = StoreFile {
                format_version: StoreFile::FORMAT_VERSION,
                order: snapshot.order.clone(),
                recipes: snapshot.recipes.clone(),
            };

            let tmp_path = self.temp_path();
            {
                let mut writer = BufWriter::new(File::create(&tmp_path)?);
                serde_json::to_writer_pretty(&mut writer, &file).map_err(|e| {
                    StoreError::Serialization(format!("failed to serialize recipes: {e}"))
                })?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp_path, &self.path)?;

            tracing::debug!(
                path = %self.path.display(),
                recipes = snapshot.recipes.len(),
                "saved recipes"
            );
            Ok(())
        }

        fn clear(&self) -> StoreResult<()> {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            Ok(())
        }

        fn is_available(&self) -> bool {
            match self.path.parent() {
                Some(parent) if parent.as_os_str().is_empty() => true,
                Some(parent) if parent.exists() => parent
                    .metadata()
                    .map(|m| !m.permissions().readonly())
                    .unwrap_or(false),
                // Created on first save.
                Some(_) => true,
                None => false,
            }
        }
    }

    impl fmt::Debug for FileStorage {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStorage")
                .field("path", &self.path)
                .finish()
        }
    }
}

#[cfg(feature = "state-persistence")]
pub use file_storage::{FileStorage, default_path};

// ─────────────────────────────────────────────────────────────────────────────
// Recipe Store
// ─────────────────────────────────────────────────────────────────────────────

/// A recipe that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewRecipe {
    /// Payload to store.
    pub fields: ItemFields,
}

impl NewRecipe {
    /// Wrap a payload.
    #[must_use]
    pub fn new(fields: ItemFields) -> Self {
        Self { fields }
    }

    fn validate(&self) -> StoreResult<()> {
        if self.fields.title.trim().is_empty() || !self.fields.has_recipe() {
            return Err(StoreError::Invalid(
                "title and recipe text are required".into(),
            ));
        }
        Ok(())
    }
}

/// CRUD store over a [`StorageBackend`].
///
/// Does not load automatically; call [`load`](Self::load) first.
pub struct RecipeStore {
    backend: Box<dyn StorageBackend>,
    snapshot: StoreSnapshot,
    dirty: bool,
}

impl RecipeStore {
    /// Create a store over `backend`.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            snapshot: StoreSnapshot::default(),
            dirty: false,
        }
    }

    /// Create a store over [`MemoryStorage`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// Create a store over a JSON file at `path`.
    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn with_file(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(Box::new(FileStorage::new(path)))
    }

    /// Name of the backend.
    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Replace the cache with the backend's contents.
    ///
    /// Returns the number of recipes loaded. Unflushed changes are discarded.
    pub fn load(&mut self) -> StoreResult<usize> {
        let mut snapshot = self.backend.load()?;
        let repairs = snapshot.normalize();
        let count = snapshot.recipes.len();
        tracing::debug!(
            backend = self.backend.name(),
            count,
            repairs,
            "loaded recipes"
        );
        self.snapshot = snapshot;
        self.dirty = repairs > 0;
        Ok(count)
    }

    /// Write the cache to the backend if anything changed.
    ///
    /// Returns true if a write happened.
    pub fn flush(&mut self) -> StoreResult<bool> {
        if !self.dirty {
            return Ok(false);
        }
        self.backend.save(&self.snapshot)?;
        self.dirty = false;
        Ok(true)
    }

    /// Returns true if there are unflushed changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.recipes.len()
    }

    /// Returns true if the store holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.recipes.is_empty()
    }

    /// All recipes in display order.
    #[must_use]
    pub fn list(&self) -> Vec<Item> {
        self.snapshot.items()
    }

    /// Display order.
    #[must_use]
    pub fn order(&self) -> &[ItemId] {
        &self.snapshot.order
    }

    /// Look up one recipe.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<Item> {
        self.snapshot
            .recipes
            .get(id)
            .map(|fields| Item::new(id.clone(), fields.clone()))
    }

    /// Store a new recipe under a fresh id and append it to the order.
    pub fn create(&mut self, recipe: NewRecipe) -> StoreResult<Item> {
        recipe.validate()?;
        let id = ItemId::new(uuid::Uuid::new_v4().to_string());
        self.snapshot.order.push(id.clone());
        self.snapshot.recipes.insert(id.clone(), recipe.fields.clone());
        self.dirty = true;
        tracing::info!(id = %id, title = %recipe.fields.title, "recipe created");
        Ok(Item::new(id, recipe.fields))
    }

    /// Replace the payload of `id`.
    pub fn update(&mut self, id: &ItemId, fields: ItemFields) -> StoreResult<Item> {
        let slot = self
            .snapshot
            .recipes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        *slot = fields.clone();
        self.dirty = true;
        tracing::info!(id = %id, "recipe updated");
        Ok(Item::new(id.clone(), fields))
    }

    /// Remove `id`.
    pub fn delete(&mut self, id: &ItemId) -> StoreResult<()> {
        if self.snapshot.recipes.remove(id).is_none() {
            return Err(StoreError::NotFound(id.clone()));
        }
        self.snapshot.order.retain(|other| other != id);
        self.dirty = true;
        tracing::info!(id = %id, "recipe deleted");
        Ok(())
    }

    /// Adopt a new display order.
    ///
    /// Unknown and repeated ids are ignored. Stored ids missing from `ids`
    /// keep their previous relative order after the given ones.
    pub fn set_order(&mut self, ids: &[ItemId]) {
        let mut seen = HashSet::new();
        let mut order: Vec<ItemId> = ids
            .iter()
            .filter(|id| self.snapshot.recipes.contains_key(*id) && seen.insert((*id).clone()))
            .cloned()
            .collect();
        order.extend(
            self.snapshot
                .order
                .iter()
                .filter(|id| !seen.contains(*id))
                .cloned(),
        );
        if order != self.snapshot.order {
            self.snapshot.order = order;
            self.dirty = true;
            tracing::debug!(count = self.snapshot.order.len(), "recipe order updated");
        }
    }

    /// Remove every recipe from the cache and the backend.
    pub fn clear(&mut self) -> StoreResult<()> {
        self.backend.clear()?;
        self.snapshot = StoreSnapshot::default();
        self.dirty = false;
        Ok(())
    }
}

impl fmt::Debug for RecipeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeStore")
            .field("backend", &self.backend.name())
            .field("recipes", &self.snapshot.recipes.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
