use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utility::{geo::haversine_distance, id::HasId};

/// A single fix of a flight recorder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub pressure_altitude: i32,
    pub gnss_altitude: i32,
    /// `false` for 2D fixes (validity flag `V`).
    pub valid: bool,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            time: NaiveTime::MIN,
            latitude,
            longitude,
            pressure_altitude: 0,
            gnss_altitude: 0,
            valid: true,
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// A recording as read from a track file, points in recorded order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTrack {
    pub pilot: String,
    pub glider_type: String,
    pub glider_id: String,
    pub date: NaiveDate,
    pub points: Vec<GeoPoint>,
}

/// Point-to-point distance used when accumulating a track length.
pub type DistanceMetric = fn(&GeoPoint, &GeoPoint) -> f64;

/// Sum of the distances between consecutive points, in recorded order.
/// Tracks with less than two points have no length.
pub fn total_distance(points: &[GeoPoint], metric: DistanceMetric) -> f64 {
    points
        .windows(2)
        .map(|pair| metric(&pair[0], &pair[1]))
        .sum()
}

/// The stored summary of an ingested track. Serializes with the wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub pilot: String,
    pub glider: String,
    pub glider_id: String,
    pub track_length: f64,
    #[serde(rename = "h_date")]
    pub date: NaiveDate,
}

impl HasId for TrackSummary {
    type IdType = u64;
}

impl TrackSummary {
    pub fn from_parsed(track: ParsedTrack, metric: DistanceMetric) -> Self {
        let track_length = total_distance(&track.points, metric);
        Self {
            pilot: track.pilot,
            glider: track.glider_type,
            glider_id: track.glider_id,
            track_length,
            date: track.date,
        }
    }

    /// Textual value of a single field, as served by the field endpoint.
    pub fn project(&self, field: TrackField) -> String {
        match field {
            TrackField::Pilot => self.pilot.clone(),
            TrackField::Glider => self.glider.clone(),
            TrackField::GliderId => self.glider_id.clone(),
            TrackField::TrackLength => self.track_length.to_string(),
            TrackField::Date => self.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// The fields of a [`TrackSummary`] reachable by wire name. Keep in sync with
/// the summary's attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackField {
    Pilot,
    Glider,
    GliderId,
    TrackLength,
    Date,
}

impl TrackField {
    pub const ALL: [TrackField; 5] = [
        TrackField::Pilot,
        TrackField::Glider,
        TrackField::GliderId,
        TrackField::TrackLength,
        TrackField::Date,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            TrackField::Pilot => "pilot",
            TrackField::Glider => "glider",
            TrackField::GliderId => "glider_id",
            TrackField::TrackLength => "track_length",
            TrackField::Date => "h_date",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == name)
    }
}

impl fmt::Display for TrackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown track field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for TrackField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire_name(s).ok_or_else(|| UnknownField(s.to_owned()))
    }
}
