//! Projection of [`AppState`] into the cards the App View renders.

use crate::feeds::{Annotation, Author, Tweet};
use crate::store::AppState;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// One card per tweet, with the annotation looked up by tweet id.
    #[default]
    Joined,
    /// One card per annotation, using the tweet embedded in the annotation.
    Annotations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationPanel<'a> {
    pub comment: &'a str,
    pub author: &'a Author,
    pub publish_date: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweetCard<'a> {
    pub key: &'a str,
    pub tweet: &'a Tweet,
    pub annotation: Option<AnnotationPanel<'a>>,
}

impl<'a> AnnotationPanel<'a> {
    /// Blank comments count as no annotation at all.
    pub fn from_annotation(annotation: &'a Annotation) -> Option<Self> {
        if annotation.annotation.trim().is_empty() {
            return None;
        }

        Some(Self {
            comment: &annotation.annotation,
            author: &annotation.author,
            publish_date: annotation.publish_date.as_deref(),
        })
    }
}

pub fn project(state: &AppState, projection: Projection) -> Vec<TweetCard<'_>> {
    match projection {
        Projection::Joined => join_by_tweet_id(&state.tweets, &state.annotations),
        Projection::Annotations => from_annotations(&state.annotations),
    }
}

/// One card per tweet in tweet order. When several annotations point at the
/// same tweet the first one wins.
pub fn join_by_tweet_id<'a>(
    tweets: &'a [Tweet],
    annotations: &'a [Annotation],
) -> Vec<TweetCard<'a>> {
    let mut by_id: HashMap<&str, &Annotation> = HashMap::with_capacity(annotations.len());
    for annotation in annotations {
        by_id
            .entry(annotation.tweet.id_str.as_str())
            .or_insert(annotation);
    }

    tweets
        .iter()
        .map(|tweet| TweetCard {
            key: &tweet.id_str,
            tweet,
            annotation: by_id
                .get(tweet.id_str.as_str())
                .copied()
                .and_then(AnnotationPanel::from_annotation),
        })
        .collect()
}

/// One card per annotation; the tweets slice is not consulted.
pub fn from_annotations(annotations: &[Annotation]) -> Vec<TweetCard<'_>> {
    annotations
        .iter()
        .map(|annotation| TweetCard {
            key: &annotation.tweet.id_str,
            tweet: &annotation.tweet,
            annotation: AnnotationPanel::from_annotation(annotation),
        })
        .collect()
}
