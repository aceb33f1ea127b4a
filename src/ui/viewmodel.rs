//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from [`FeedState`]
//! snapshots. View models contain no business logic, only display-ready text:
//! dates are already formatted and fallbacks for missing fields already applied.
//!
//! # Example
//!
//! ```rust
//! use photofeed::app::FeedState;
//! use photofeed::ui::FeedViewModel;
//!
//! let state = FeedState::default();
//! let vm = FeedViewModel::from_state(&state);
//! assert!(vm.loading);
//! assert_eq!(vm.header.title, "Public images");
//! ```

use crate::app::FeedState;
use crate::domain::{ImageItem, SortCriterion};
use chrono::{DateTime, Utc};

/// Display format for item dates.
pub const DATE_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Complete view model for one rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedViewModel {
    pub header: HeaderInfo,

    /// One card per image, in list order.
    pub cards: Vec<ImageCard>,

    /// Whether the loading indicator is shown.
    pub loading: bool,

    /// Sort dialog, present only while it is open.
    pub sort_dialog: Option<SortDialog>,

    /// Error toast, present only while an error is shown.
    pub error: Option<String>,
}

/// Title bar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Tags of the last submitted search.
    pub subtitle: Option<String>,
}

/// Display information for a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCard {
    /// Position in the list, as accepted by the `browse`, `save` and `share` commands.
    pub index: usize,
    pub title: String,
    pub tags: Option<String>,
    pub author: Option<String>,
    pub media_url: Option<String>,
    /// `"Published: dd-MM-yyyy HH:mm:ss"`, if the item has the date.
    pub published: Option<String>,
    /// `"Taken: dd-MM-yyyy HH:mm:ss"`, if the item has the date.
    pub taken: Option<String>,
}

/// Sort dialog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDialog {
    pub options: Vec<SortOption>,
}

/// One selectable sort criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub criterion: SortCriterion,
    pub label: &'static str,
    pub selected: bool,
}

impl FeedViewModel {
    /// Computes the view model for a snapshot.
    #[must_use]
    pub fn from_state(state: &FeedState) -> Self {
        let cards = state
            .images
            .as_deref()
            .map(|images| {
                images
                    .iter()
                    .enumerate()
                    .map(|(index, item)| ImageCard::from_item(index, item))
                    .collect()
            })
            .unwrap_or_default();

        let sort_dialog = state.sort_dialog_visible.then(|| SortDialog {
            options: [SortCriterion::Published, SortCriterion::Taken]
                .into_iter()
                .map(|criterion| SortOption {
                    criterion,
                    label: criterion.label(),
                    selected: criterion == state.criterion,
                })
                .collect(),
        });

        Self {
            header: HeaderInfo {
                title: "Public images".to_string(),
                subtitle: state.tags.clone().filter(|tags| !tags.trim().is_empty()),
            },
            cards,
            loading: state.loading,
            sort_dialog,
            error: state.error_message.clone(),
        }
    }
}

impl ImageCard {
    fn from_item(index: usize, item: &ImageItem) -> Self {
        Self {
            index,
            title: item
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "(untitled)".to_string()),
            tags: item.tags.clone().filter(|t| !t.trim().is_empty()),
            author: item.author.clone(),
            media_url: item.media_url().map(str::to_string),
            published: item.published.map(|d| format!("Published: {}", format_date(d))),
            taken: item.date_taken.map(|d| format!("Taken: {}", format_date(d))),
        }
    }
}

/// Formats a timestamp as `dd-MM-yyyy HH:mm:ss` in UTC.
#[must_use]
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}
