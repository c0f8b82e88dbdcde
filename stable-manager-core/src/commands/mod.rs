//! Command implementations: promote, restore, clean, list.

use serde::Serialize;

pub mod clean;
pub mod list;
pub mod promote;
pub mod restore;

/// How a mutating command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The change was confirmed (or forced) and written.
    Applied,
    /// The user declined; nothing was written.
    Declined,
    /// There was nothing to act on.
    NothingToDo,
    /// Confirmed, but some files could not be changed.
    Incomplete,
}
