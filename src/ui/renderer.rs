//! Plain-text rendering of feed snapshots.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform [`FeedState`] into [`FeedViewModel`]
//! 2. **Section Rendering**: Header, optional loading line, cards, then the
//!    sort dialog and error toast as overlays
//!
//! Output is returned as a string so the front-end decides where it goes.

use crate::app::FeedState;
use crate::ui::viewmodel::{FeedViewModel, HeaderInfo, ImageCard, SortDialog};
use std::fmt::Write;

/// Renders a snapshot to text.
///
/// # Example
///
/// ```rust
/// use photofeed::app::FeedState;
/// use photofeed::ui::render;
///
/// let frame = render(&FeedState::default());
/// assert!(frame.starts_with("Public images"));
/// assert!(frame.contains("Loading"));
/// ```
#[must_use]
pub fn render(state: &FeedState) -> String {
    render_viewmodel(&FeedViewModel::from_state(state))
}

/// Renders an already computed view model.
#[must_use]
pub fn render_viewmodel(vm: &FeedViewModel) -> String {
    let mut out = String::new();

    render_header(&mut out, &vm.header);

    if vm.loading {
        out.push_str("Loading...\n");
    } else if vm.cards.is_empty() {
        out.push_str("No images\n");
    }

    for card in &vm.cards {
        render_card(&mut out, card);
    }

    if let Some(dialog) = &vm.sort_dialog {
        render_sort_dialog(&mut out, dialog);
    }

    if let Some(error) = &vm.error {
        let _ = writeln!(out, "[!] {error}  (dismiss)");
    }

    out
}

fn render_header(out: &mut String, header: &HeaderInfo) {
    out.push_str(&header.title);
    if let Some(subtitle) = &header.subtitle {
        let _ = write!(out, " - {subtitle}");
    }
    out.push('\n');
    out.push_str(&"=".repeat(40));
    out.push('\n');
}

fn render_card(out: &mut String, card: &ImageCard) {
    let _ = writeln!(out, "[{}] {}", card.index, card.title);

    let details = [
        card.tags.as_deref().map(|t| format!("tags: {t}")),
        card.author.as_deref().map(|a| format!("by {a}")),
        card.published.clone(),
        card.taken.clone(),
        card.media_url.clone(),
    ];

    for line in details.into_iter().flatten() {
        let _ = writeln!(out, "    {line}");
    }
}

fn render_sort_dialog(out: &mut String, dialog: &SortDialog) {
    out.push_str("Sort by:\n");
    for option in &dialog.options {
        let mark = if option.selected { "✓" } else { " " };
        let _ = writeln!(out, "  {mark} {}", option.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ImageItem, SortCriterion};
    use std::sync::Arc;

    #[test]
    fn loaded_feed_lists_cards_without_loading_line() {
        let state = FeedState {
            loading: false,
            images: Some(Arc::new(vec![ImageItem {
                title: Some("Cat".to_string()),
                tags: Some("cats".to_string()),
                ..ImageItem::default()
            }])),
            tags: Some("cats".to_string()),
            ..FeedState::default()
        };

        let frame = render(&state);

        assert!(frame.starts_with("Public images - cats\n"));
        assert!(!frame.contains("Loading"));
        assert!(frame.contains("[0] Cat\n"));
        assert!(frame.contains("    tags: cats\n"));
    }

    #[test]
    fn empty_feed_says_so() {
        let state = FeedState {
            loading: false,
            images: Some(Arc::new(Vec::new())),
            ..FeedState::default()
        };
        assert!(render(&state).contains("No images"));
    }

    #[test]
    fn overlays_follow_the_cards() {
        let state = FeedState {
            loading: false,
            criterion: SortCriterion::Published,
            sort_dialog_visible: true,
            error_message: Some("Network Error".to_string()),
            ..FeedState::default()
        };

        let frame = render(&state);

        assert!(frame.contains("  ✓ Date Published\n"));
        assert!(frame.contains("    Date Taken\n"));
        assert!(frame.ends_with("[!] Network Error  (dismiss)\n"));
    }
}
