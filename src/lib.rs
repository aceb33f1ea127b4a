//! Photofeed: a client for a public photo feed searchable by tags.
//!
//! Photofeed retrieves a public image feed, optionally filtered by tags, sorts
//! it by publication or capture date, and exposes the result as a stream of
//! immutable state snapshots:
//! - Tag search with whitespace-separated input normalized to the feed's filter
//! - Sorting by date published or date taken, switchable at any time
//! - Latest-value broadcast of the sorted list with replay for late subscribers
//! - Error reporting folded into state instead of escaping the pipeline
//! - A terminal front-end with browse, save, and share actions

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Front-end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Reducer
//! │  - Action handling                                  │  ← Effects as data
//! │  - State projection                                 │
//! │  - Fetch scheduling                                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Feed Layer    │   │ Storage Layer │
//! │ (ui/)         │   │ (feed/)       │   │ (storage/)    │
//! │ - View model  │   │ - Fetcher     │   │ - Gallery     │
//! │ - Rendering   │   │ - Replay chan │   │ - JSON I/O    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Source Layer (source/)                             │  ← Retrieval
//! │  - Feed response model                              │
//! │  - RemoteImageSource trait                          │
//! └─────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │  ← Core types
//! │  - ImageItem, SortCriterion                         │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - [`app`]: Actions, the pure reducer, state snapshots, and the runtime
//! - [`domain`]: Feed items, sort criteria, and error types
//! - [`feed`]: Retrieval-and-sort pipeline and the replay channel
//! - [`source`]: Feed retrieval abstraction and the file-backed source
//! - [`storage`]: Gallery for saved images
//! - [`ui`]: View models and plain-text rendering
//! - [`infrastructure`]: Data directory and path helpers
//! - [`observability`]: Tracing setup with a rotating log file
//!
//! # Configuration
//!
//! The client reads a TOML file, every key optional:
//!
//! ```toml
//! feed_path = "~/photos/feed.json"
//! trace_level = "debug"
//! log_file = "~/.local/share/photofeed/photofeed.log"
//! latency_ms = 300
//! save_permission = true
//! gallery_path = "~/Pictures/photofeed.json"
//! ```
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use photofeed::{initialize, Config, FeedAction};
//!
//! # async fn demo() {
//! let config = Config::load("config.toml").unwrap_or_default();
//! let mut reducer = initialize(&config);
//! let mut states = reducer.subscribe();
//!
//! reducer.apply(FeedAction::SearchTextChanged("cats dogs".into()));
//! reducer.apply(FeedAction::SearchComplete);
//!
//! while reducer.state().loading {
//!     reducer.next_update().await;
//! }
//! if let Some(state) = states.try_recv() {
//!     println!("{} images tagged {:?}", state.image_count(), state.tags);
//! }
//! # }
//! ```
//!
//! # Design Principles
//!
//! ## Effects as Data
//!
//! The reducer never performs I/O. It returns the next cells plus a list of
//! effects, and the runtime executes them:
//! - Every action can be tested without a runtime
//! - Fetch scheduling lives in one place
//!
//! ## Last Request Wins
//!
//! Starting a fetch cancels the one in flight, and a fetch that is overtaken
//! anyway discards its result, so an older search can never overwrite a newer one.
//!
//! ## Snapshots, Not Cells
//!
//! Observers only see immutable [`FeedState`] values. A subscription replays the
//! latest snapshot on connect and skips intermediate ones it was too slow to read.

pub mod app;
pub mod domain;
pub mod feed;
pub mod infrastructure;
pub mod source;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{FeedAction, FeedReducer, FeedState};
pub use domain::{FeedError, ImageItem, Result, SortCriterion};
pub use feed::ImageFeedFetcher;
pub use source::{JsonFeedSource, RemoteImageSource};

use infrastructure::{expand_tilde, get_data_dir};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Client configuration, read from a TOML file.
///
/// Every field has a default, so an empty file (or none at all) is valid.
/// Paths may start with `~`.
///
/// # Example
///
/// ```toml
/// feed_path = "~/photos/feed.json"
/// latency_ms = 250
/// save_permission = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Feed document served by the file-backed source.
    ///
    /// Default: `<data dir>/feed.json`
    pub feed_path: Option<PathBuf>,

    /// Tracing level for the log file.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. `RUST_LOG` takes
    /// precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log file location. Default: `<data dir>/photofeed.log`
    pub log_file: Option<PathBuf>,

    /// Artificial delay added to every feed request, in milliseconds.
    pub latency_ms: u64,

    /// Whether the user granted permission to save images. Default: `true`
    pub save_permission: bool,

    /// Gallery index saved images are appended to.
    ///
    /// Default: `<data dir>/gallery.json`
    pub gallery_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_path: None,
            trace_level: None,
            log_file: None,
            latency_ms: 0,
            save_permission: true,
            gallery_path: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] if the text is not valid TOML or contains
    /// unknown keys or mistyped values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use photofeed::Config;
    ///
    /// let config = Config::from_toml_str("latency_ms = 300\nsave_permission = false").unwrap();
    /// assert_eq!(config.latency_ms, 300);
    /// assert!(!config.save_permission);
    /// assert_eq!(config.trace_level, None);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| FeedError::Config(e.to_string()))?;
        Ok(config.expanded())
    }

    /// Loads configuration from `path`, falling back to defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the feed document path.
    #[must_use]
    pub fn feed_file_path(&self) -> PathBuf {
        self.feed_path
            .clone()
            .unwrap_or_else(|| get_data_dir().join("feed.json"))
    }

    /// Returns the log file path.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| get_data_dir().join("photofeed.log"))
    }

    /// Returns the gallery index path.
    #[must_use]
    pub fn gallery_file_path(&self) -> PathBuf {
        self.gallery_path
            .clone()
            .unwrap_or_else(|| get_data_dir().join("gallery.json"))
    }

    fn expanded(mut self) -> Self {
        for path in [&mut self.feed_path, &mut self.log_file, &mut self.gallery_path]
            .into_iter()
            .flatten()
        {
            if let Some(text) = path.to_str() {
                *path = expand_tilde(text);
            }
        }
        self
    }
}

/// Builds the feed pipeline for `config` and starts the initial fetch.
///
/// The returned reducer reads from a [`JsonFeedSource`] at
/// [`Config::feed_file_path`] with the configured latency. Tracing is not
/// initialized here; call [`observability::init_tracing`] first if logs are
/// wanted.
///
/// # Panics
///
/// Must be called from within a tokio runtime.
///
/// # Example
///
/// ```rust,no_run
/// use photofeed::{initialize, Config};
///
/// # async fn demo() {
/// let reducer = initialize(&Config::default());
/// assert!(reducer.state().loading);
/// # }
/// ```
pub fn initialize(config: &Config) -> FeedReducer<JsonFeedSource> {
    let feed_path = config.feed_file_path();
    tracing::info!(feed = ?feed_path, latency_ms = config.latency_ms, "initializing photofeed");

    let source =
        JsonFeedSource::new(feed_path).with_latency(Duration::from_millis(config.latency_ms));
    FeedReducer::new(Arc::new(ImageFeedFetcher::new(source)))
}
