use super::{decode_list, Annotation, FetchError, ResourceFetcher, Tweet};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub struct HttpFetcher {
    base_url: String,
    tweets_path: String,
    annotations_path: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: String, tweets_path: String, annotations_path: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tweetnotes/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url,
            tweets_path,
            annotations_path,
            client,
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "fetching resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        decode_list(&url, &body)
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_tweets(&self) -> Result<Vec<Tweet>, FetchError> {
        self.get_list(&self.tweets_path).await
    }

    async fn fetch_annotations(&self) -> Result<Vec<Annotation>, FetchError> {
        self.get_list(&self.annotations_path).await
    }
}
