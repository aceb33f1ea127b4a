//! User actions and the side effects the reducer asks for.
//!
//! [`FeedAction`] values are constructed by the presentation layer and consumed
//! once by the reducer. [`Effect`] values are produced by the reducer and
//! executed by the [`FeedReducer`](crate::app::FeedReducer) runtime. Keeping
//! effects as data lets the pure reducer be tested without a runtime.
//!
//! # Example
//!
//! ```rust
//! use photofeed::app::{reduce, FeedAction, FeedCells};
//!
//! let cells = FeedCells::default();
//! let (cells, effects) = reduce(&cells, &FeedAction::SearchTextChanged("cats".into()));
//! assert_eq!(cells.search_text, "cats");
//! assert!(effects.is_empty());
//! ```

use crate::domain::{ImageItem, SortCriterion};

/// Events originating from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    /// The in-progress search text changed.
    SearchTextChanged(String),
    /// The user submitted the current search text.
    SearchComplete,
    /// Opens the sort dialog.
    ChangeFiltering,
    /// Closes the sort dialog without choosing.
    DismissFilterDialog,
    /// Selects a sort criterion from the dialog.
    SortCriterion(SortCriterion),
    /// Opens the item's page. Handled by the presentation layer.
    Browse(ImageItem),
    /// Saves the item's image. Handled by the presentation layer.
    Save(ImageItem),
    /// Shares the item's image URL. Handled by the presentation layer.
    Share(ImageItem),
    /// Shows an error message.
    Error(String),
    /// Hides the error message.
    DismissError,
}

impl FeedAction {
    /// Returns the item for actions performed on a single feed entry.
    ///
    /// The presentation layer uses this to intercept browse, save, and share
    /// before forwarding everything else to the reducer.
    #[must_use]
    pub fn item(&self) -> Option<&ImageItem> {
        match self {
            Self::Browse(item) | Self::Save(item) | Self::Share(item) => Some(item),
            _ => None,
        }
    }
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the feed with the given filter and sort criterion.
    Fetch {
        /// Comma-separated tag filter, `None` for the unfiltered feed.
        tags: Option<String>,
        /// Criterion to sort the fetched list by.
        criterion: SortCriterion,
    },
}
