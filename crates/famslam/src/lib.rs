#![forbid(unsafe_code)]

//! FamSlam public facade crate.
//!
//! Re-exports the list engine, its input model and (with the `runtime`
//! feature) persistence and configuration, plus a prelude for day-to-day use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use famslam_core::event::{Axis, PointerEvent, PointerPhase, PointerSource};
pub use famslam_core::gesture::{
    DEFAULT_THRESHOLD_RATIO, GestureTracker, SwipeConfig, SwipeDecision, SwipePhase,
};

// --- List re-exports -------------------------------------------------------

pub use famslam_list::{
    DELETE_LABEL, DragState, Item, ItemDetailCoordinator, ItemFields, ItemId, ListEngine,
    ListEvent, NoOpReason, ReorderOutcome, RowFeedback, RowInteraction,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use famslam_runtime::{
    AppShell, ConfigError, DraftError, EngineConfig, ErrorPane, ItemDraft, LogFormat,
    MemoryStorage, NewRecipe, PageSnapshot, RecipeStore, StorageBackend, StoreError,
};

#[cfg(feature = "state-persistence")]
pub use famslam_runtime::FileStorage;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for FamSlam apps.
#[derive(Debug)]
pub enum Error {
    /// Persistence failure.
    #[cfg(feature = "runtime")]
    Store(StoreError),
    /// Unusable page URL.
    #[cfg(feature = "runtime")]
    Draft(DraftError),
    /// Unusable configuration value.
    #[cfg(feature = "runtime")]
    Config(ConfigError),
    /// Anything else, with a message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "runtime")]
            Self::Store(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Draft(err) => write!(f, "{err}"),
            #[cfg(feature = "runtime")]
            Self::Config(err) => write!(f, "{err}"),
            Self::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "runtime")]
            Self::Store(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Draft(err) => Some(err),
            #[cfg(feature = "runtime")]
            Self::Config(err) => Some(err),
            Self::Other(_) => None,
        }
    }
}

#[cfg(feature = "runtime")]
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

#[cfg(feature = "runtime")]
impl From<DraftError> for Error {
    fn from(err: DraftError) -> Self {
        Self::Draft(err)
    }
}

#[cfg(feature = "runtime")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for FamSlam APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

/// Common imports for driving the list and its runtime.
pub mod prelude {
    pub use crate::{
        Error, Item, ItemFields, ItemId, ListEngine, ListEvent, PointerEvent, PointerPhase,
        ReorderOutcome, Result, RowFeedback, SwipeConfig, SwipeDecision,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{AppShell, EngineConfig, ItemDraft, PageSnapshot, RecipeStore};

    pub use crate::{core, list};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use famslam_core as core;
pub use famslam_list as list;
#[cfg(feature = "runtime")]
pub use famslam_runtime as runtime;
