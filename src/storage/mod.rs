//! Storage layer for saved images.
//!
//! The presentation layer's save action records the chosen photo in a gallery
//! index on disk. The core never touches this module; it only sees the error
//! message when a save fails.
//!
//! # Modules
//!
//! - `backend`: Gallery trait abstraction for backend implementations
//! - `json`: JSON file-based gallery index
//! - `models`: Saved image record

pub mod backend;
pub mod json;
pub mod models;

pub use backend::Gallery;
pub use json::JsonGallery;
pub use models::SavedImage;
