use async_trait::async_trait;
use model::track::ParsedTrack;

use crate::SourceError;

/// Something that turns a track location into a parsed recording.
#[async_trait]
pub trait TrackSource: Send + Sync {
    async fn parse(&self, url: &str) -> Result<ParsedTrack, SourceError>;
}
