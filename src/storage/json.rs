//! JSON file-based gallery index.
//!
//! This module stores saved images in a human-readable JSON file. It uses
//! atomic file writes (write-to-temp + rename) to prevent corruption on crashes.

use crate::domain::error::{FeedError, Result};
use crate::storage::backend::Gallery;
use crate::storage::models::SavedImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// JSON gallery container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GalleryData {
    /// Version of the gallery format for future migrations.
    version: u32,

    #[serde(default)]
    images: Vec<SavedImage>,
}

impl Default for GalleryData {
    fn default() -> Self {
        Self {
            version: 1,
            images: Vec::new(),
        }
    }
}

/// JSON file gallery.
///
/// The whole index is kept in memory and rewritten on every save.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "images": [
///     {
///       "url": "https://example.com/1_m.jpg",
///       "title": "Sunset",
///       "description": "sunset beach",
///       "saved_at": 1653914723
///     }
///   ]
/// }
/// ```
#[derive(Debug)]
pub struct JsonGallery {
    file_path: PathBuf,
    data: GalleryData,
}

impl JsonGallery {
    /// Opens the gallery at `file_path`, starting empty if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening gallery");

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            GalleryData::default()
        };

        tracing::debug!(images = data.images.len(), "gallery opened");
        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<GalleryData> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save_to_file(&self) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(images = self.data.images.len(), "gallery saved");
        Ok(())
    }
}

impl Gallery for JsonGallery {
    fn save(&mut self, image: SavedImage) -> Result<String> {
        let _span = tracing::debug_span!("gallery_save", url = %image.url).entered();

        self.data.images.push(image);
        if let Err(e) = self.save_to_file() {
            self.data.images.pop();
            return Err(FeedError::Save(e.to_string()));
        }

        Ok(self.file_path.display().to_string())
    }

    fn list(&self) -> Result<Vec<SavedImage>> {
        Ok(self.data.images.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> SavedImage {
        SavedImage {
            url: url.to_string(),
            title: "title".to_string(),
            description: "tags".to_string(),
            saved_at: 1_653_914_723,
        }
    }

    #[test]
    fn saves_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery").join("gallery.json");

        let mut gallery = JsonGallery::open(&path).unwrap();
        let location = gallery.save(record("https://example.com/a.jpg")).unwrap();
        gallery.save(record("https://example.com/b.jpg")).unwrap();
        assert_eq!(location, path.display().to_string());

        let reopened = JsonGallery::open(&path).unwrap();
        let urls: Vec<String> = reopened.list().unwrap().into_iter().map(|i| i.url).collect();
        assert_eq!(urls, vec!["https://example.com/a.jpg", "https://example.com/b.jpg"]);
    }

    #[test]
    fn corrupt_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(JsonGallery::open(&path), Err(FeedError::Decode(_))));
    }

    #[test]
    fn failed_write_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let mut gallery = JsonGallery::open(blocker.join("gallery.json")).unwrap();
        let err = gallery.save(record("https://example.com/a.jpg")).unwrap_err();

        assert!(matches!(err, FeedError::Save(_)));
        assert!(gallery.list().unwrap().is_empty());
    }
}
