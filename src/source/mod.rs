//! Source layer for retrieving the public photo feed.
//!
//! # Modules
//!
//! - `backend`: [`RemoteImageSource`] trait the fetch pipeline depends on
//! - `json`: File-backed source with the remote service's tag semantics
//! - `models`: Feed response document

pub mod backend;
pub mod json;
pub mod models;

pub use backend::RemoteImageSource;
pub use json::JsonFeedSource;
pub use models::ImageListResponse;
