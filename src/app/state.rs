//! Reducer-owned state and the derived snapshot shown to the presentation layer.
//!
//! # Architecture
//!
//! State is split in two:
//!
//! - [`FeedCells`]: fields owned and updated by the reducer
//! - the latest image list published by the fetcher
//!
//! [`FeedState::project`] merges both into an immutable snapshot. The runtime
//! calls it whenever either input changes, so the snapshot never needs to be
//! mutated in place.

use crate::domain::SortCriterion;
use crate::feed::ImageList;

/// Fields owned by the reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedCells {
    /// Whether a fetch is in flight.
    pub loading: bool,

    /// Tags of the last submitted search, as typed.
    pub tags: Option<String>,

    /// Current in-progress search text.
    pub search_text: String,

    /// Criterion the list is sorted by.
    pub criterion: SortCriterion,

    /// Whether the sort dialog is shown.
    pub sort_dialog_visible: bool,

    /// Error message overlaid on the feed, if any.
    pub error_message: Option<String>,
}

/// Snapshot of everything the presentation layer renders.
///
/// An error message may coexist with a normal feed; the presentation layer
/// overlays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    pub loading: bool,
    pub images: Option<ImageList>,
    pub tags: Option<String>,
    pub search_text: String,
    pub criterion: SortCriterion,
    pub sort_dialog_visible: bool,
    pub error_message: Option<String>,
}

impl FeedState {
    /// Builds a snapshot from the reducer cells and the latest image list.
    #[must_use]
    pub fn project(cells: &FeedCells, images: Option<&ImageList>) -> Self {
        Self {
            loading: cells.loading,
            images: images.cloned(),
            tags: cells.tags.clone(),
            search_text: cells.search_text.clone(),
            criterion: cells.criterion,
            sort_dialog_visible: cells.sort_dialog_visible,
            error_message: cells.error_message.clone(),
        }
    }

    /// Returns the number of images in the snapshot.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.as_ref().map_or(0, |images| images.len())
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            loading: true,
            images: None,
            tags: None,
            search_text: String::new(),
            criterion: SortCriterion::Published,
            sort_dialog_visible: false,
            error_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageItem;
    use std::sync::Arc;

    #[test]
    fn projection_copies_cells_and_images() {
        let cells = FeedCells {
            loading: true,
            tags: Some("cats dogs".to_string()),
            search_text: "cats dogs".to_string(),
            criterion: SortCriterion::Taken,
            sort_dialog_visible: true,
            error_message: Some("Network Error".to_string()),
        };
        let images: ImageList = Arc::new(vec![ImageItem::default(); 2]);

        let state = FeedState::project(&cells, Some(&images));

        assert!(state.loading);
        assert_eq!(state.tags.as_deref(), Some("cats dogs"));
        assert_eq!(state.criterion, SortCriterion::Taken);
        assert!(state.sort_dialog_visible);
        assert_eq!(state.error_message.as_deref(), Some("Network Error"));
        assert_eq!(state.image_count(), 2);
    }

    #[test]
    fn default_snapshot_is_loading_by_published_date() {
        let state = FeedState::default();
        assert!(state.loading);
        assert!(state.images.is_none());
        assert_eq!(state.criterion, SortCriterion::Published);
        assert!(!state.sort_dialog_visible);
        assert_eq!(state.image_count(), 0);
    }
}
