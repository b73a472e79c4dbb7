#![forbid(unsafe_code)]

//! Runtime around the FamSlam list engine.
//!
//! - [`store`]: recipe CRUD over pluggable storage backends
//! - [`draft`]: the add-item form model
//! - [`shell`]: engine + store wiring and user-facing error reporting
//! - [`config`]: environment-driven configuration
//! - [`logging`]: subscriber installation

pub mod config;
pub mod draft;
pub mod logging;
pub mod shell;
pub mod store;

pub use config::{ConfigError, EngineConfig};
pub use draft::{DraftError, ItemDraft, PageSnapshot, validate_page_url};
pub use logging::LogFormat;
pub use shell::{AppShell, ErrorPane};
#[cfg(feature = "state-persistence")]
pub use store::FileStorage;
pub use store::{
    MemoryStorage, NewRecipe, RecipeStore, StorageBackend, StoreError, StoreResult, StoreSnapshot,
};
