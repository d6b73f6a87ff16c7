use std::collections::HashMap;

use model::track::TrackSummary;
use tokio::sync::RwLock;
use utility::id::Id;

use crate::{TrackError, TrackResult};

/// In-memory table of track summaries. Append only.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: RwLock<HashMap<Id<TrackSummary>, TrackSummary>>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the summary under `number of stored tracks + 1`.
    pub async fn create(&self, summary: TrackSummary) -> Id<TrackSummary> {
        // the write lock spans counting and inserting
        let mut tracks = self.tracks.write().await;
        // count based ids are only unique as long as nothing gets removed
        let id = Id::new(tracks.len() as u64 + 1);
        tracks.insert(id, summary);
        id
    }

    pub async fn list(&self) -> Vec<Id<TrackSummary>> {
        self.tracks.read().await.keys().copied().collect()
    }

    pub async fn get(&self, id: Id<TrackSummary>) -> TrackResult<TrackSummary> {
        self.tracks
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| TrackError::NotFound(id.to_string()))
    }

    /// Like [`TrackStore::get`] for an id as it appears in a request path.
    pub async fn get_by_text(&self, id: &str) -> TrackResult<TrackSummary> {
        let id = Id::parse_positive(id)
            .ok_or_else(|| TrackError::InvalidId(id.to_owned()))?;
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;

    fn summary(pilot: &str) -> TrackSummary {
        TrackSummary {
            pilot: pilot.to_owned(),
            glider: "LS4".to_owned(),
            glider_id: "D-4711".to_owned(),
            track_length: 42.0,
            date: NaiveDate::from_ymd_opt(2018, 8, 2).unwrap(),
        }
    }

    #[tokio::test]
    async fn sequential_ids() {
        let store = TrackStore::new();
        for expected in 1..=5 {
            let id = store.create(summary("pilot")).await;
            assert_eq!(id.raw(), expected);
        }
        assert_eq!(store.list().await.len(), 5);
    }

    #[tokio::test]
    async fn concurrent_creates_get_unique_ids() {
        let store = Arc::new(TrackStore::new());
        let handles = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(summary(&i.to_string())).await })
            })
            .collect::<Vec<_>>();

        let mut ids = vec![];
        for handle in handles {
            ids.push(handle.await.unwrap().raw());
        }
        ids.sort();
        assert_eq!(ids, (1..=32).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn lists_all_ids() {
        let store = TrackStore::new();
        assert!(store.list().await.is_empty());
        store.create(summary("a")).await;
        store.create(summary("b")).await;

        let mut ids = store.list().await;
        ids.sort();
        assert_eq!(ids, vec![Id::new(1), Id::new(2)]);
    }

    #[tokio::test]
    async fn get_returns_a_copy() {
        let store = TrackStore::new();
        let id = store.create(summary("Jane")).await;
        assert_eq!(store.get(id).await.unwrap(), summary("Jane"));
        assert_eq!(store.get_by_text("1").await.unwrap().pilot, "Jane");
    }

    #[tokio::test]
    async fn invalid_ids() {
        let store = TrackStore::new();
        store.create(summary("Jane")).await;
        for text in ["abc", "-1", "", "0", "1a"] {
            assert!(
                matches!(store.get_by_text(text).await, Err(TrackError::InvalidId(_))),
                "{text:?}"
            );
        }
    }

    #[tokio::test]
    async fn missing_ids() {
        let store = TrackStore::new();
        assert!(matches!(
            store.get_by_text("999").await,
            Err(TrackError::NotFound(id)) if id == "999"
        ));
        assert!(matches!(
            store.get(Id::new(1)).await,
            Err(TrackError::NotFound(_))
        ));
    }
}
