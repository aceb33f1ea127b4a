//! Pure reducer for feed actions.
//!
//! This module maps `(cells, action)` to `(cells', effects)` without touching
//! the runtime. Fetch outcomes reported back by the runtime are folded in the
//! same way through [`fold_outcome`].
//!
//! # Action Table
//!
//! | Action | Effect |
//! |---|---|
//! | `SearchTextChanged(t)` | `search_text := t` |
//! | `SearchComplete` | non-blank text: fetch with normalized text, `tags := search_text` |
//! | `ChangeFiltering` | show sort dialog |
//! | `DismissFilterDialog` | hide sort dialog |
//! | `SortCriterion(c)` | hide dialog, `criterion := c`; fetch normalized text if `c` changed |
//! | `Browse` / `Save` / `Share` | none, handled by the presentation layer |
//! | `Error(msg)` | `error_message := msg` |
//! | `DismissError` | `error_message := None` |
//!
//! Every emitted fetch sets `loading`; the matching outcome clears it.

use crate::app::actions::{Effect, FeedAction};
use crate::app::state::FeedCells;
use crate::domain::SortCriterion;

/// Separator the remote service uses between tags in a filter.
pub const TAG_SEPARATOR: &str = ",";

/// How a fetch issued by the reducer ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was retrieved and published.
    Completed,
    /// Retrieval failed with the given message.
    Failed(String),
}

/// Converts search text into the remote filter convention.
///
/// Runs of whitespace collapse into a single [`TAG_SEPARATOR`]; leading and
/// trailing whitespace is dropped. Blank text yields `None` (no filter).
///
/// # Examples
///
/// ```
/// use photofeed::app::normalize_tags;
///
/// assert_eq!(normalize_tags("cats  dogs\tbirds").as_deref(), Some("cats,dogs,birds"));
/// assert_eq!(normalize_tags("   "), None);
/// ```
#[must_use]
pub fn normalize_tags(text: &str) -> Option<String> {
    let tags: Vec<&str> = text.split_whitespace().collect();
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(TAG_SEPARATOR))
    }
}

/// Returns the cells a reducer starts with and the initial unfiltered fetch.
#[must_use]
pub fn initialize() -> (FeedCells, Vec<Effect>) {
    let cells = FeedCells::default();
    fetch(cells, None, SortCriterion::Published)
}

/// Applies `action` to `cells`, returning the next cells and requested effects.
///
/// # Example
///
/// ```rust
/// use photofeed::app::{reduce, Effect, FeedAction, FeedCells};
///
/// let cells = FeedCells::default();
/// let (cells, _) = reduce(&cells, &FeedAction::SearchTextChanged("cats dogs".into()));
/// let (cells, effects) = reduce(&cells, &FeedAction::SearchComplete);
///
/// assert_eq!(cells.tags.as_deref(), Some("cats dogs"));
/// assert!(matches!(
///     effects.as_slice(),
///     [Effect::Fetch { tags: Some(t), .. }] if t == "cats,dogs"
/// ));
/// ```
#[must_use]
pub fn reduce(cells: &FeedCells, action: &FeedAction) -> (FeedCells, Vec<Effect>) {
    let _span = tracing::debug_span!("reduce", action = action_name(action)).entered();

    let mut next = cells.clone();

    match action {
        FeedAction::SearchTextChanged(text) => {
            tracing::trace!(text = %text, "search text updated");
            next.search_text.clone_from(text);
            (next, vec![])
        }
        FeedAction::SearchComplete => {
            let Some(tags) = normalize_tags(&next.search_text) else {
                tracing::debug!("blank search submitted, ignoring");
                return (next, vec![]);
            };

            tracing::debug!(tags = %tags, "search submitted");
            let criterion = next.criterion;
            next.tags = Some(next.search_text.clone());
            fetch(next, Some(tags), criterion)
        }
        FeedAction::ChangeFiltering => {
            next.sort_dialog_visible = true;
            (next, vec![])
        }
        FeedAction::DismissFilterDialog => {
            next.sort_dialog_visible = false;
            (next, vec![])
        }
        FeedAction::SortCriterion(criterion) => {
            let changed = *criterion != next.criterion;
            tracing::debug!(
                from = ?next.criterion,
                to = ?criterion,
                changed,
                "sort criterion selected"
            );

            next.sort_dialog_visible = false;
            next.criterion = *criterion;

            if changed {
                let tags = normalize_tags(&next.search_text);
                fetch(next, tags, *criterion)
            } else {
                (next, vec![])
            }
        }
        FeedAction::Browse(_) | FeedAction::Save(_) | FeedAction::Share(_) => {
            tracing::debug!("item action left to the presentation layer");
            (next, vec![])
        }
        FeedAction::Error(message) => {
            tracing::debug!(message = %message, "showing error");
            next.error_message = Some(message.clone());
            (next, vec![])
        }
        FeedAction::DismissError => {
            next.error_message = None;
            (next, vec![])
        }
    }
}

/// Folds the outcome of the current fetch into `cells`.
///
/// Both outcomes clear `loading`. A failure is shown through the same path as
/// an [`FeedAction::Error`].
#[must_use]
pub fn fold_outcome(cells: &FeedCells, outcome: &FetchOutcome) -> FeedCells {
    let mut next = cells.clone();
    next.loading = false;

    match outcome {
        FetchOutcome::Completed => next,
        FetchOutcome::Failed(message) => {
            tracing::warn!(message = %message, "fetch failed");
            let (next, _) = reduce(&next, &FeedAction::Error(message.clone()));
            next
        }
    }
}

fn fetch(
    mut cells: FeedCells,
    tags: Option<String>,
    criterion: SortCriterion,
) -> (FeedCells, Vec<Effect>) {
    cells.loading = true;
    (cells, vec![Effect::Fetch { tags, criterion }])
}

const fn action_name(action: &FeedAction) -> &'static str {
    match action {
        FeedAction::SearchTextChanged(_) => "search_text_changed",
        FeedAction::SearchComplete => "search_complete",
        FeedAction::ChangeFiltering => "change_filtering",
        FeedAction::DismissFilterDialog => "dismiss_filter_dialog",
        FeedAction::SortCriterion(_) => "sort_criterion",
        FeedAction::Browse(_) => "browse",
        FeedAction::Save(_) => "save",
        FeedAction::Share(_) => "share",
        FeedAction::Error(_) => "error",
        FeedAction::DismissError => "dismiss_error",
    }
}
