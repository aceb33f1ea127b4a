//! Runtime that owns the reducer cells and executes fetch effects.
//!
//! [`FeedReducer`] is driven from a single task. Actions are applied
//! synchronously through [`FeedReducer::apply`]; fetches run on spawned tokio
//! tasks and report back through an internal channel, which the owning task
//! drains with [`FeedReducer::next_update`] (or [`FeedReducer::run`], which
//! does both). State is therefore only ever mutated by the owning task.
//!
//! # Flow
//!
//! ```text
//! apply(action) ──► reduce ──► Effect::Fetch ──► spawn(fetcher.fetch)
//!       │                                              │
//!       ▼                                              ├─► image channel
//!   publish snapshot ◄── fold_outcome ◄── outcome ─────┘
//! ```
//!
//! Starting a fetch aborts the one in flight. Outcomes are tagged with a
//! generation number so a late outcome from an aborted fetch is ignored.
//!
//! A list that arrives while a fetch is in flight is held back and folded
//! together with that fetch's outcome, so observers never see the new list
//! under `loading = true`.

use crate::app::actions::{Effect, FeedAction};
use crate::app::handler::{self, FetchOutcome};
use crate::app::state::{FeedCells, FeedState};
use crate::feed::{ImageFeedFetcher, ImageList, ReplayChannel, Subscription};
use crate::source::RemoteImageSource;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::Instrument;

#[derive(Debug)]
struct FetchReport {
    generation: u64,
    outcome: FetchOutcome,
}

#[derive(Debug)]
enum Update {
    Fetch(FetchReport),
    Images(ImageList),
}

/// Owns the feed state and coordinates the fetcher.
///
/// Observers read [`FeedState`] snapshots through [`FeedReducer::subscribe`];
/// the subscription replays the current snapshot immediately.
///
/// # Example
///
/// ```no_run
/// use photofeed::app::{FeedAction, FeedReducer};
/// use photofeed::feed::ImageFeedFetcher;
/// use photofeed::source::JsonFeedSource;
/// use std::sync::Arc;
///
/// # async fn demo() {
/// let fetcher = Arc::new(ImageFeedFetcher::new(JsonFeedSource::new("feed.json")));
/// let mut reducer = FeedReducer::new(fetcher);
/// let mut states = reducer.subscribe();
///
/// reducer.apply(FeedAction::SearchTextChanged("cats".into()));
/// reducer.apply(FeedAction::SearchComplete);
/// while reducer.state().loading {
///     reducer.next_update().await;
/// }
/// println!("{:?}", states.recv().await);
/// # }
/// ```
pub struct FeedReducer<S> {
    fetcher: Arc<ImageFeedFetcher<S>>,
    cells: FeedCells,
    images: Option<ImageList>,
    pending_images: Option<ImageList>,
    image_updates: Subscription<ImageList>,
    reports_tx: mpsc::UnboundedSender<FetchReport>,
    reports_rx: mpsc::UnboundedReceiver<FetchReport>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    states: ReplayChannel<FeedState>,
}

impl<S: RemoteImageSource + 'static> FeedReducer<S> {
    /// Creates the reducer and starts the initial unfiltered fetch.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime, since the initial fetch is
    /// spawned immediately.
    pub fn new(fetcher: Arc<ImageFeedFetcher<S>>) -> Self {
        let (cells, effects) = handler::initialize();
        let (reports_tx, reports_rx) = mpsc::unbounded_channel();
        let image_updates = fetcher.subscribe();
        let images: Option<ImageList> = Some(Arc::new(Vec::new()));
        let states = ReplayChannel::with_initial(FeedState::project(&cells, images.as_ref()));

        let mut reducer = Self {
            fetcher,
            cells,
            images,
            pending_images: None,
            image_updates,
            reports_tx,
            reports_rx,
            generation: 0,
            in_flight: None,
            states,
        };

        tracing::debug!("feed reducer created");
        for effect in effects {
            reducer.execute(effect);
        }
        reducer
    }

    /// Returns the latest snapshot.
    #[must_use]
    pub fn state(&self) -> FeedState {
        self.states.latest().unwrap_or_default()
    }

    /// Opens a subscription to state snapshots, starting with the current one.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<FeedState> {
        self.states.subscribe()
    }

    /// Returns true while a fetch started by this reducer has not reported back.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Applies a user action.
    ///
    /// Updates the cells, starts any fetch the action requires, and publishes
    /// a new snapshot if anything visible changed.
    pub fn apply(&mut self, action: FeedAction) {
        let (cells, effects) = handler::reduce(&self.cells, &action);
        self.cells = cells;

        for effect in effects {
            self.execute(effect);
        }

        self.publish();
    }

    /// Waits for the next fetch outcome or image list and folds it in.
    ///
    /// The reducer keeps its fetcher and report channel alive, so when nothing
    /// is in flight this waits until the caller gives up on it.
    pub async fn next_update(&mut self) {
        let update = self.wait_update().await;
        self.fold_update(update);
    }

    /// Drives the reducer until `actions` closes.
    ///
    /// Any fetch still in flight is aborted when the loop ends.
    pub async fn run(mut self, mut actions: mpsc::Receiver<FeedAction>) {
        tracing::debug!("feed reducer loop started");

        loop {
            let next = tokio::select! {
                action = actions.recv() => Err(action),
                update = self.wait_update() => Ok(update),
            };

            match next {
                Err(Some(action)) => self.apply(action),
                Err(None) => break,
                Ok(update) => self.fold_update(update),
            }
        }

        tracing::debug!("action stream closed, stopping feed reducer");
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch { tags, criterion } => {
                if let Some(previous) = self.in_flight.take() {
                    tracing::debug!(generation = self.generation, "cancelling in-flight fetch");
                    previous.abort();
                }

                self.generation += 1;
                let generation = self.generation;
                let fetcher = Arc::clone(&self.fetcher);
                let reports = self.reports_tx.clone();

                tracing::debug!(generation, tags = ?tags, criterion = ?criterion, "starting fetch");

                self.in_flight = Some(tokio::spawn(async move {
                    let outcome = match fetcher.fetch(tags.as_deref(), criterion).await {
                        Ok(_) => FetchOutcome::Completed,
                        Err(e) => FetchOutcome::Failed(e.to_string()),
                    };
                    let _ = reports.send(FetchReport { generation, outcome });
                }
                .instrument(tracing::debug_span!("fetch", generation))));
            }
        }
    }

    async fn wait_update(&mut self) -> Update {
        tokio::select! {
            biased;
            Some(report) = self.reports_rx.recv() => Update::Fetch(report),
            Some(images) = self.image_updates.recv() => Update::Images(images),
            // Both senders outlive `self`; nothing to wait for if they are gone.
            else => std::future::pending().await,
        }
    }

    fn fold_update(&mut self, update: Update) {
        match update {
            Update::Fetch(report) => {
                if report.generation != self.generation {
                    tracing::debug!(
                        generation = report.generation,
                        current = self.generation,
                        "ignoring outcome of superseded fetch"
                    );
                    return;
                }

                self.in_flight = None;
                // The list is published before the outcome is sent, so it is
                // either held back already or still unread on the channel.
                let held = self.pending_images.take();
                let latest = self.image_updates.try_recv().or(held);
                if let Some(images) = latest {
                    self.images = Some(images);
                }
                self.cells = handler::fold_outcome(&self.cells, &report.outcome);
                self.publish();
            }
            Update::Images(images) if self.in_flight.is_some() => {
                tracing::debug!(count = images.len(), "image list held until fetch reports");
                self.pending_images = Some(images);
            }
            Update::Images(images) => {
                tracing::debug!(count = images.len(), "image list received");
                self.images = Some(images);
                self.publish();
            }
        }
    }

    fn publish(&self) {
        let state = FeedState::project(&self.cells, self.images.as_ref());
        if self.states.latest().as_ref() == Some(&state) {
            tracing::trace!("state unchanged, skipping publish");
            return;
        }

        tracing::debug!(
            loading = state.loading,
            images = state.image_count(),
            criterion = ?state.criterion,
            error = state.error_message.is_some(),
            "publishing feed state"
        );
        self.states.publish(state);
    }
}

impl<S> Drop for FeedReducer<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl<S> std::fmt::Debug for FeedReducer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedReducer")
            .field("cells", &self.cells)
            .field("generation", &self.generation)
            .field("fetching", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}
