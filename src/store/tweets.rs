use super::{Action, Dispatcher};
use crate::feeds::{ResourceFetcher, Tweet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweetsAction {
    Upsert(Vec<Tweet>),
}

/// Despite the name, an upsert replaces the whole list.
pub fn reduce(_state: Vec<Tweet>, action: TweetsAction) -> Vec<Tweet> {
    match action {
        TweetsAction::Upsert(tweets) => tweets,
    }
}

/// Fetch the tweet list and hand it to the store. Failures are logged and
/// leave the slice untouched.
pub async fn fetch(fetcher: &dyn ResourceFetcher, dispatcher: &Dispatcher) {
    match fetcher.fetch_tweets().await {
        Ok(tweets) => {
            tracing::info!(count = tweets.len(), "tweets fetched");
            dispatcher.dispatch(Action::Tweets(TweetsAction::Upsert(tweets)));
        }
        Err(error) => {
            tracing::error!(%error, "API Error fetchTweets");
        }
    }
}
