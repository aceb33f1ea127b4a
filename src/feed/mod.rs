//! Fetch pipeline and its broadcast channel.
//!
//! The fetcher is the leaf component of the client: it talks to the remote
//! source, sorts what comes back, and publishes the result. The reducer in
//! [`crate::app`] subscribes to the published lists instead of receiving them
//! as return values.
//!
//! # Architecture
//!
//! - `channel`: Single-slot broadcast with latest-value replay
//! - `fetcher`: Retrieval, sorting, and publication of the image list

pub mod channel;
pub mod fetcher;

pub use channel::{ReplayChannel, Subscription};
pub use fetcher::{FetchStatus, ImageFeedFetcher, ImageList};
