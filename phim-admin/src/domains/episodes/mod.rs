//! Episode list reconciliation: deduplication and per-row actions.

pub mod dedupe;
pub mod rows;

pub use dedupe::dedupe_episodes;
pub use rows::{
    RowOutcome, create_episode_row, refresh_episodes, remove_episode_row,
};
