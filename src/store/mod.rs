//! Client-side state container.
//!
//! Two independent slices (`tweets`, `annotations`) live in one [`AppState`].
//! Every change goes through a single action queue and a pure reducer, and
//! the resulting state is published to subscribers over a watch channel.

pub mod annotations;
pub mod tweets;

use crate::feeds::{Annotation, ResourceFetcher, Tweet};
use annotations::AnnotationsAction;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tweets::TweetsAction;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub tweets: Vec<Tweet>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Tweets(TweetsAction),
    Annotations(AnnotationsAction),
}

/// Root reducer. Each action touches exactly one slice.
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::Tweets(action) => AppState {
            tweets: tweets::reduce(state.tweets, action),
            annotations: state.annotations,
        },
        Action::Annotations(action) => AppState {
            tweets: state.tweets,
            annotations: annotations::reduce(state.annotations, action),
        },
    }
}

/// Cloneable handle that enqueues actions on the store's queue.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn dispatch(&self, action: Action) {
        if self.tx.send(action).is_err() {
            tracing::debug!("store dropped, action discarded");
        }
    }
}

pub struct Store {
    state: AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    notify: watch::Sender<AppState>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (notify, _) = watch::channel(AppState::default());

        Self {
            state: AppState::default(),
            tx,
            rx,
            notify,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            tx: self.tx.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.notify.subscribe()
    }

    /// Apply one action and publish the new state.
    pub fn apply(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.notify.send_replace(self.state.clone());
    }

    /// Apply every queued action in enqueue order. Returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.apply(action);
            applied += 1;
        }
        applied
    }

    /// Wait for the next queued action and apply it.
    ///
    /// The store keeps its own sender alive, so this only completes when an
    /// action actually arrives.
    pub async fn next_action(&mut self) {
        if let Some(action) = self.rx.recv().await {
            self.apply(action);
        }
    }

    /// Kick off both slice fetches concurrently.
    ///
    /// Neither waits for the other and each only ever dispatches to its own
    /// slice. The handles are returned for callers that need to know when
    /// both have settled; the TUI drops them.
    pub fn start(&self, fetcher: Arc<dyn ResourceFetcher>) -> Vec<JoinHandle<()>> {
        let tweets_task = {
            let fetcher = Arc::clone(&fetcher);
            let dispatcher = self.dispatcher();
            tokio::spawn(async move { tweets::fetch(fetcher.as_ref(), &dispatcher).await })
        };

        let annotations_task = {
            let dispatcher = self.dispatcher();
            tokio::spawn(async move { annotations::fetch(fetcher.as_ref(), &dispatcher).await })
        };

        vec![tweets_task, annotations_task]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::{Author, FetchError};
    use async_trait::async_trait;

    struct StubFetcher {
        tweets: Option<Vec<Tweet>>,
        annotations: Option<Vec<Annotation>>,
    }

    fn stub_error() -> FetchError {
        FetchError::Io {
            path: "stub".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "stub"),
        }
    }

    #[async_trait]
    impl ResourceFetcher for StubFetcher {
        async fn fetch_tweets(&self) -> Result<Vec<Tweet>, FetchError> {
            self.tweets.clone().ok_or_else(stub_error)
        }

        async fn fetch_annotations(&self) -> Result<Vec<Annotation>, FetchError> {
            self.annotations.clone().ok_or_else(stub_error)
        }
    }

    fn annotation(id: &str, comment: &str) -> Annotation {
        Annotation {
            tweet: Tweet::new(id, "embedded"),
            author: Author {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@x.com".to_string(),
            },
            annotation: comment.to_string(),
            publish_date: None,
        }
    }

    async fn settle(store: &mut Store, fetcher: StubFetcher) {
        for handle in store.start(Arc::new(fetcher)) {
            handle.await.unwrap();
        }
        store.process_pending();
    }

    #[test]
    fn test_initial_state_is_empty() {
        let store = Store::new();
        assert!(store.state().tweets.is_empty());
        assert!(store.state().annotations.is_empty());
    }

    #[test]
    fn test_root_reducer_leaves_other_slice_alone() {
        let state = AppState {
            tweets: vec![Tweet::new("1", "a")],
            annotations: vec![annotation("1", "note")],
        };

        let next = reduce(
            state.clone(),
            Action::Tweets(TweetsAction::Upsert(vec![Tweet::new("2", "b")])),
        );
        assert_eq!(next.tweets, vec![Tweet::new("2", "b")]);
        assert_eq!(next.annotations, state.annotations);
    }

    #[test]
    fn test_dispatches_apply_in_order() {
        let mut store = Store::new();
        let dispatcher = store.dispatcher();

        dispatcher.dispatch(Action::Tweets(TweetsAction::Upsert(vec![Tweet::new("1", "a")])));
        dispatcher.dispatch(Action::Tweets(TweetsAction::Upsert(vec![Tweet::new("2", "b")])));

        assert_eq!(store.process_pending(), 2);
        assert_eq!(store.state().tweets, vec![Tweet::new("2", "b")]);
    }

    #[test]
    fn test_subscribers_see_every_applied_state() {
        let mut store = Store::new();
        let mut changes = store.subscribe();
        assert!(!changes.has_changed().unwrap());

        store.apply(Action::Annotations(AnnotationsAction::Upsert(vec![
            annotation("5", "hi"),
        ])));

        assert!(changes.has_changed().unwrap());
        assert_eq!(changes.borrow_and_update().annotations.len(), 1);
    }

    #[tokio::test]
    async fn test_successful_fetch_replaces_slices() {
        let tweets = vec![Tweet::new("2", "b"), Tweet::new("1", "a")];
        let annotations = vec![annotation("2", "note")];

        let mut store = Store::new();
        settle(
            &mut store,
            StubFetcher {
                tweets: Some(tweets.clone()),
                annotations: Some(annotations.clone()),
            },
        )
        .await;

        assert_eq!(store.state().tweets, tweets);
        assert_eq!(store.state().annotations, annotations);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_slice_unchanged() {
        let mut store = Store::new();
        let existing = vec![Tweet::new("1", "kept")];
        store.apply(Action::Tweets(TweetsAction::Upsert(existing.clone())));

        settle(
            &mut store,
            StubFetcher {
                tweets: None,
                annotations: Some(vec![annotation("1", "note")]),
            },
        )
        .await;

        assert_eq!(store.state().tweets, existing);
        assert_eq!(store.state().annotations.len(), 1);
    }

    #[tokio::test]
    async fn test_both_fetches_failing_keeps_empty_state() {
        let mut store = Store::new();
        settle(
            &mut store,
            StubFetcher {
                tweets: None,
                annotations: None,
            },
        )
        .await;

        assert_eq!(store.state(), &AppState::default());
    }

    #[tokio::test]
    async fn test_next_action_applies_one() {
        let mut store = Store::new();
        store
            .dispatcher()
            .dispatch(Action::Tweets(TweetsAction::Upsert(vec![Tweet::new("1", "a")])));

        store.next_action().await;
        assert_eq!(store.state().tweets.len(), 1);
    }
}
