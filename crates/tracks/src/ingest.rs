use std::sync::Arc;

use model::track::{DistanceMetric, GeoPoint, TrackSummary};

use crate::{source::TrackSource, TrackError, TrackResult};

/// Loads tracks from a [`TrackSource`] and reduces them to summaries.
pub struct TrackIngestor {
    source: Arc<dyn TrackSource>,
    metric: DistanceMetric,
}

impl TrackIngestor {
    pub fn new(source: Arc<dyn TrackSource>) -> Self {
        Self::with_metric(source, GeoPoint::distance_km)
    }

    pub fn with_metric(source: Arc<dyn TrackSource>, metric: DistanceMetric) -> Self {
        Self { source, metric }
    }

    /// Single attempt, no retry. The summary has no id yet.
    pub async fn ingest(&self, url: &str) -> TrackResult<TrackSummary> {
        let track = self.source.parse(url).await.map_err(|why| {
            log::warn!("could not load track from {}: {}", url, why);
            TrackError::Parse(why)
        })?;
        log::debug!(
            "parsed track from {} with {} points",
            url,
            track.points.len()
        );
        Ok(TrackSummary::from_parsed(track, self.metric))
    }
}
