pub mod http;
pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub const TWEETS_RESOURCE: &str = "recent-tweets.json";
pub const ANNOTATIONS_RESOURCE: &str = "annotations.json";

/// Missing and `null` both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Tweet {
    pub id_str: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub favorite_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_retweet: bool,
    #[serde(default)]
    pub in_reply_to_user_id_str: Option<String>,
}

impl Tweet {
    pub fn new(id_str: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id_str: id_str.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn status_url(&self) -> String {
        format!("https://twitter.com/i/web/status/{}", self.id_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Annotation {
    pub tweet: Tweet,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: Author,
    /// Comment body. A `null` comment decodes as empty and gets no panel.
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotation: String,
    #[serde(default)]
    pub publish_date: Option<String>,
}

/// Failure while fetching one of the static resources.
///
/// The store treats every variant the same way: log and keep the slice as it
/// was. The variants only exist to make the diagnostic readable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{resource} is not a valid JSON array: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Source of the two static resources the store is built from.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_tweets(&self) -> Result<Vec<Tweet>, FetchError>;
    async fn fetch_annotations(&self) -> Result<Vec<Annotation>, FetchError>;
}

pub(crate) fn decode_list<T>(resource: &str, body: &[u8]) -> Result<Vec<T>, FetchError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| FetchError::Decode {
        resource: resource.to_string(),
        source,
    })
}
