//! Application layer: the feed reducer and its runtime.
//!
//! This module sits between the presentation layer and the fetch pipeline. It
//! implements a unidirectional data flow:
//!
//! ```text
//! FeedAction → reduce → cells' + Effects → FeedReducer executes effects
//!      ↑                                              ↓
//!      │                                     ImageFeedFetcher publishes
//!      │                                              ↓
//!  presentation ◄── FeedState snapshot ◄── project(cells, images)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: User actions and the effects the reducer requests
//! - [`handler`]: Pure reducer, tag normalization, and outcome folding
//! - [`reducer`]: Runtime owning the cells, fetch tasks, and snapshot channel
//! - [`state`]: Reducer cells and the derived snapshot

pub mod actions;
pub mod handler;
pub mod reducer;
pub mod state;

pub use actions::{Effect, FeedAction};
pub use handler::{fold_outcome, initialize, normalize_tags, reduce, FetchOutcome, TAG_SEPARATOR};
pub use reducer::FeedReducer;
pub use state::{FeedCells, FeedState};
