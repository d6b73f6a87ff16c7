use thiserror::Error;

pub mod client;
pub mod ingest;
pub mod source;
pub mod store;

pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Request scoped failures. The display text is what callers get to see.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The track source could not be fetched or did not contain a track.
    #[error("Url did not contain track data.")]
    Parse(#[source] SourceError),
    #[error("Invalid ID.")]
    InvalidId(String),
    #[error("Track with ID '{0}' doesn't exist.")]
    NotFound(String),
    #[error("Track has no field '{0}'.")]
    UnknownField(String),
}

pub type TrackResult<O> = Result<O, TrackError>;
