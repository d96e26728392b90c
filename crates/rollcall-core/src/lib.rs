//! Core library for rollcall.
//!
//! Provides the pieces of the attendance roster that do not depend on a
//! terminal: the layout engine (name parsing, sort keys, bucketing and
//! column packing), the selection store, persisted display options,
//! configuration and the HTTP client for the roster endpoint.

pub mod api;
pub mod config;
pub mod layout;
pub mod models;
pub mod prefs;
pub mod selection;

pub use api::{ApiClient, ApiError, SubmitRequest};
pub use config::Config;
pub use layout::RosterLayout;
pub use models::{DisplayOptions, GroupAssignment, GroupByMode, RosterEntry, SortMode, SubmitOutcome};
pub use prefs::{FileStore, KeyValueStore, MemoryStore};
pub use selection::SelectionStore;
