//! Terminal front-end for photofeed.
//!
//! Reads line commands from stdin, forwards feed actions to the reducer loop,
//! and prints every published snapshot. Browse, save, and share act on a single
//! item and are handled here; everything else goes to the reducer.
//!
//! # Usage
//!
//! ```text
//! photofeed [config.toml]
//! ```

use photofeed::domain::SortCriterion;
use photofeed::infrastructure::get_data_dir;
use photofeed::observability::init_tracing;
use photofeed::storage::{Gallery, JsonGallery, SavedImage};
use photofeed::{Config, FeedAction, FeedError, FeedState, ImageItem};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = "commands: type <text> | search | sort [published|taken] | close | \
                    browse N | save N | share N | dismiss | quit";

/// A parsed stdin command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Action(FeedAction),
    Browse(usize),
    Save(usize),
    Share(usize),
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));

        let command = match word {
            "type" => Self::Action(FeedAction::SearchTextChanged(rest.to_string())),
            "search" => Self::Action(FeedAction::SearchComplete),
            "sort" if rest.trim().is_empty() => Self::Action(FeedAction::ChangeFiltering),
            "sort" => Self::Action(FeedAction::SortCriterion(SortCriterion::from_name(rest)?)),
            "close" => Self::Action(FeedAction::DismissFilterDialog),
            "dismiss" => Self::Action(FeedAction::DismissError),
            "browse" => Self::Browse(rest.trim().parse().ok()?),
            "save" => Self::Save(rest.trim().parse().ok()?),
            "share" => Self::Share(rest.trim().parse().ok()?),
            "quit" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> photofeed::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| get_data_dir().join("config.toml"), PathBuf::from);
    let config = Config::load(&config_path)?;

    init_tracing(&config);
    tracing::info!(config = ?config_path, "photofeed starting");

    let reducer = photofeed::initialize(&config);
    let mut frames = reducer.subscribe();
    let mut snapshots = reducer.subscribe();

    let (actions, actions_rx) = mpsc::channel(32);
    let reducer_task = tokio::spawn(reducer.run(actions_rx));

    let render_task = tokio::spawn(async move {
        while let Some(state) = frames.recv().await {
            print!("\n{}", photofeed::ui::render(&state));
        }
    });

    println!("{HELP}");

    let mut current = FeedState::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        while let Some(state) = snapshots.try_recv() {
            current = state;
        }

        let Some(command) = Command::parse(&line) else {
            println!("{HELP}");
            continue;
        };

        let action = match command {
            Command::Quit => break,
            Command::Action(action) => Some(action),
            Command::Browse(index) => item_at(&current, index).map(FeedAction::Browse),
            Command::Save(index) => item_at(&current, index).map(FeedAction::Save),
            Command::Share(index) => item_at(&current, index).map(FeedAction::Share),
        };

        let Some(action) = action else {
            println!("no image at that position");
            continue;
        };

        let forwarded = match action.item() {
            Some(_) => handle_item_action(&action, &config).await,
            None => Some(action),
        };

        if let Some(action) = forwarded {
            if actions.send(action).await.is_err() {
                tracing::warn!("reducer loop ended early");
                break;
            }
        }
    }

    drop(actions);
    if let Err(e) = reducer_task.await {
        tracing::error!(error = %e, "reducer task failed");
    }
    if let Err(e) = render_task.await {
        tracing::error!(error = %e, "render task failed");
    }

    tracing::info!("photofeed stopped");
    Ok(())
}

fn item_at(state: &FeedState, index: usize) -> Option<ImageItem> {
    state.images.as_ref()?.get(index).cloned()
}

/// Performs browse, save, or share, returning an action for the reducer if
/// the user has to be told about a failure.
async fn handle_item_action(action: &FeedAction, config: &Config) -> Option<FeedAction> {
    match action {
        FeedAction::Browse(item) => {
            if let Some(link) = &item.link {
                println!("open: {link}");
            }
            None
        }
        FeedAction::Share(item) => {
            if let Some(body) = share_message(item) {
                println!("{body}");
            }
            None
        }
        FeedAction::Save(item) => save(item, config).await,
        _ => None,
    }
}

/// Message handed to the share target: a subject line and the image URL.
fn share_message(item: &ImageItem) -> Option<String> {
    let url = item.media_url()?;
    Some(format!("Subject: Check out this image\n\n{url}"))
}

async fn save(item: &ImageItem, config: &Config) -> Option<FeedAction> {
    let image = SavedImage::from_item(item)?;

    if !config.save_permission {
        tracing::info!("save refused, permission not granted");
        return Some(FeedAction::Error(FeedError::PermissionDenied.to_string()));
    }

    let gallery_path = config.gallery_file_path();
    let saved = tokio::task::spawn_blocking(move || {
        JsonGallery::open(gallery_path).and_then(|mut gallery| gallery.save(image))
    })
    .await;

    match saved {
        Ok(Ok(path)) => {
            println!("Saved under {path}");
            None
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "save failed");
            Some(FeedAction::Error("Save failed".to_string()))
        }
        Err(e) => {
            tracing::error!(error = %e, "save task failed");
            Some(FeedAction::Error("Save failed".to_string()))
        }
    }
}
