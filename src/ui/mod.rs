//! User interface layer for the terminal front-end.
//!
//! This module turns feed snapshots into plain text. It holds no state; every
//! frame is computed from the latest [`FeedState`](crate::app::FeedState).
//!
//! # Architecture
//!
//! ```text
//! FeedState → FeedViewModel::from_state → FeedViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Text rendering of view models
//!
//! # Example
//!
//! ```rust
//! use photofeed::app::FeedState;
//! use photofeed::ui::render;
//!
//! print!("{}", render(&FeedState::default()));
//! ```

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{format_date, FeedViewModel, HeaderInfo, ImageCard, SortDialog, SortOption};
