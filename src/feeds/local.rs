use super::{
    decode_list, Annotation, FetchError, ResourceFetcher, Tweet, ANNOTATIONS_RESOURCE,
    TWEETS_RESOURCE,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Reads the resources from a directory laid out like the published `data/` folder.
pub struct DirFetcher {
    dir: PathBuf,
}

impl DirFetcher {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    async fn read_list<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, FetchError> {
        let path = self.dir.join(file);
        tracing::debug!(path = %path.display(), "reading resource");

        let body = tokio::fs::read(&path)
            .await
            .map_err(|source| FetchError::Io {
                path: path.display().to_string(),
                source,
            })?;

        decode_list(&path.display().to_string(), &body)
    }
}

#[async_trait]
impl ResourceFetcher for DirFetcher {
    async fn fetch_tweets(&self) -> Result<Vec<Tweet>, FetchError> {
        self.read_list(TWEETS_RESOURCE).await
    }

    async fn fetch_annotations(&self) -> Result<Vec<Annotation>, FetchError> {
        self.read_list(ANNOTATIONS_RESOURCE).await
    }
}
