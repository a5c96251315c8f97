//! Values exchanged with the road information server and the map surface.

use std::fmt::{self, Display};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Status string the server uses for a congested road.
pub const CONGESTED: &str = "Congested";

/// Status shown before any report has been received.
pub const UNKNOWN_STATUS: &str = "examining...";

/// Fixed reference point every polyline starts from.
pub const KINGS_CROSS: Coordinate = Coordinate { latitude: 51.530_1, longitude: -0.123_98 };

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Road information returned by `GET /road-information`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficReport {
    /// Where the road is.
    pub position: Coordinate,

    /// Congestion status, e.g. `Congested` or `Clear`.
    pub status: String,

    /// Road name.
    pub name: String,
}

/// Camera move issued to the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPosition {
    pub target: Coordinate,
    pub zoom: f64,
    pub tilt: f64,
    pub bearing: f64,
    pub duration: Duration,
}

/// Marker animation played when the marker is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Bounce,
}

/// Options for a new marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: Coordinate,
    pub title: String,
    pub snippet: String,
    pub animation: Animation,
}

/// Stroke color of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineColor {
    Red,
    Blue,
}

impl LineColor {
    /// Red for a congested road, blue for anything else.
    #[must_use]
    pub fn for_status(status: &str) -> Self {
        if status == CONGESTED { Self::Red } else { Self::Blue }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a new polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineOptions {
    pub points: Vec<Coordinate>,
    pub color: LineColor,
    pub width: u32,
    pub idx: u32,
}

/// Options passed to the geolocation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
}

/// Result of a click on the fetch control.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The report was drawn on the map.
    Rendered(TrafficReport),

    /// The server answered with a non-success status; the user was alerted.
    Rejected { status: u16 },

    /// The request failed before a response arrived.
    Unreachable,

    /// A request was already outstanding, so the click was dropped.
    Ignored,
}
