//! Data models for roster entities.
//!
//! This module contains the data structures shared between the layout
//! engine, the API client and the terminal UI:
//!
//! - `RosterEntry`: one name/group record as fetched from the endpoint
//! - `RosterResponse`, `SubmitResponse`: wire shapes of the endpoint replies
//! - `SubmitOutcome`: a successful submission, ready for the status line
//! - `DisplayOptions`, `SortMode`, `GroupByMode`: persisted view options
//! - `GroupAssignment`: the group picker value sent with a submission

pub mod assignment;
pub mod options;
pub mod roster;

pub use assignment::GroupAssignment;
pub use options::{DisplayOptions, GroupByMode, SortMode};
pub use roster::{RosterEntry, RosterResponse, RosterRow, SubmitOutcome, SubmitResponse};
