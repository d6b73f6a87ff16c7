use std::sync::Arc;

use model::track::{TrackField, TrackSummary, UnknownField};
use utility::id::Id;

use crate::{
    ingest::TrackIngestor, source::TrackSource, store::TrackStore, TrackError,
    TrackResult,
};

/// Handle used by request handlers. Clones share the same store.
#[derive(Clone)]
pub struct Client {
    ingestor: Arc<TrackIngestor>,
    store: Arc<TrackStore>,
}

impl Client {
    pub fn new(ingestor: TrackIngestor, store: TrackStore) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
            store: Arc::new(store),
        }
    }

    pub fn from_source<S: TrackSource + 'static>(source: S) -> Self {
        Self::new(TrackIngestor::new(Arc::new(source)), TrackStore::new())
    }

    pub async fn create_track(&self, url: &str) -> TrackResult<Id<TrackSummary>> {
        // fetch before taking the store lock
        let summary = self.ingestor.ingest(url).await?;
        let id = self.store.create(summary).await;
        log::info!("stored track {} from {}", id, url);
        Ok(id)
    }

    pub async fn track_ids(&self) -> Vec<Id<TrackSummary>> {
        self.store.list().await
    }

    pub async fn track(&self, id: &str) -> TrackResult<TrackSummary> {
        self.store.get_by_text(id).await
    }

    pub async fn track_field(&self, id: &str, field: &str) -> TrackResult<String> {
        let track = self.store.get_by_text(id).await?;
        let field = field
            .parse::<TrackField>()
            .map_err(|UnknownField(name)| TrackError::UnknownField(name))?;
        Ok(track.project(field))
    }
}
