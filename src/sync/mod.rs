//! Search, filtering and infinite-scroll synchronization for the tool list.

pub mod controller;
pub mod intent;
pub mod runtime;
pub mod timer;

pub use controller::{FetchKind, FetchRequest, ListSyncController, SyncSettings, ViewState};
pub use intent::{InputEvent, Intent, ScrollPosition};
pub use runtime::{ListSnapshot, ListSync};
