//! Roster layout engine.
//!
//! Turns fetched roster rows into labeled buckets packed into display
//! columns. Every function here is pure; the terminal UI only draws the
//! resulting `RosterLayout`.
//!
//! Pipeline: `name` (split names) -> `sort_key` / `group_key` (derive keys)
//! -> `entry` (sort) -> `grouper` (bucket) -> `columns` (pack) -> `view`.

pub mod columns;
pub mod entry;
pub mod group_key;
pub mod grouper;
pub mod name;
pub mod sort_key;
pub mod view;

pub use columns::{assign_columns, pack_columns};
pub use entry::{prepare_entries, ParsedEntry};
pub use group_key::canonical_group_key;
pub use grouper::{group_entries, Bucket};
pub use name::{parse_name, NameParts};
pub use sort_key::{build_sort_keys, collate, normalize_for_sort, SortKeys};
pub use view::{RenderedBucket, RenderedRow, RosterLayout};
