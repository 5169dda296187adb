use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tweetnotes::app::snapshot;
use tweetnotes::config::DisplayConfig;
use tweetnotes::feeds::local::DirFetcher;
use tweetnotes::feeds::{ResourceFetcher, ANNOTATIONS_RESOURCE, TWEETS_RESOURCE};
use tweetnotes::store::Store;
use tweetnotes::ui::view_model::Projection;

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[tokio::test]
async fn test_store_loads_sample_data_in_order() {
    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(DirFetcher::new(sample_dir()));
    let mut store = Store::new();
    let mut changes = store.subscribe();

    for handle in store.start(fetcher) {
        handle.await.unwrap();
    }
    assert_eq!(store.process_pending(), 2);

    let state = store.state();
    assert_eq!(state.tweets.len(), 2);
    assert_eq!(state.tweets[0].id_str, "1059885485466460161");
    assert_eq!(state.annotations.len(), 1);
    assert_eq!(state.annotations[0].author.first_name, "Jane");

    assert!(changes.has_changed().unwrap());
    assert_eq!(&*changes.borrow_and_update(), state);
}

#[tokio::test]
async fn test_snapshot_joins_annotation_onto_its_tweet() {
    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(DirFetcher::new(sample_dir()));
    let text = snapshot(fetcher, DisplayConfig::default(), 100)
        .await
        .unwrap();

    assert!(text.contains("Thank you Indiana!"));
    assert!(text.contains("Big crowds in Missouri tonight."));
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("jane@example.com"));
    assert!(text.find("Big crowds").unwrap() < text.find("Crowd size").unwrap());
}

#[tokio::test]
async fn test_snapshot_renders_with_one_resource_broken() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(TWEETS_RESOURCE),
        r#"[{"id_str":"1","text":"still here"}]"#,
    )
    .unwrap();
    fs::write(dir.path().join(ANNOTATIONS_RESOURCE), "not json").unwrap();

    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(DirFetcher::new(dir.path().to_path_buf()));
    let text = snapshot(fetcher, DisplayConfig::default(), 80).await.unwrap();

    assert!(text.contains("still here"));
    assert!(!text.contains('│'));
}

#[tokio::test]
async fn test_snapshot_annotations_projection_with_nothing_fetched() {
    let dir = TempDir::new().unwrap();
    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(DirFetcher::new(dir.path().to_path_buf()));
    let display = DisplayConfig {
        projection: Projection::Annotations,
        ..DisplayConfig::default()
    };

    let text = snapshot(fetcher, display, 80).await.unwrap();
    assert_eq!(text, "Tweet annotations\n");
}
