use super::{Action, Dispatcher};
use crate::feeds::{Annotation, ResourceFetcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationsAction {
    Upsert(Vec<Annotation>),
}

pub fn reduce(_state: Vec<Annotation>, action: AnnotationsAction) -> Vec<Annotation> {
    match action {
        AnnotationsAction::Upsert(annotations) => annotations,
    }
}

pub async fn fetch(fetcher: &dyn ResourceFetcher, dispatcher: &Dispatcher) {
    match fetcher.fetch_annotations().await {
        Ok(annotations) => {
            tracing::info!(count = annotations.len(), "annotations fetched");
            dispatcher.dispatch(Action::Annotations(AnnotationsAction::Upsert(annotations)));
        }
        Err(error) => {
            tracing::error!(%error, "API Error fetchAnnotations");
        }
    }
}
