//! # Render
//!
//! Drawing rules for a traffic report, kept free of any map so they can be
//! checked directly.

use crate::config::{CameraConfig, Config};
use crate::types::{
    Animation, CameraPosition, Coordinate, KINGS_CROSS, LineColor, MarkerOptions,
    PolylineOptions, TrafficReport,
};

/// Camera move centring the map on `target`.
#[must_use]
pub const fn camera(settings: &CameraConfig, target: Coordinate) -> CameraPosition {
    CameraPosition {
        target,
        zoom: settings.zoom,
        tilt: settings.tilt,
        bearing: settings.bearing,
        duration: settings.duration,
    }
}

/// Marker announcing the report's status at the road's position.
#[must_use]
pub fn marker(report: &TrafficReport) -> MarkerOptions {
    MarkerOptions {
        position: report.position,
        title: format!("Traffic status: \n {}", report.status),
        snippet: report.name.clone(),
        animation: Animation::Bounce,
    }
}

/// Line from the reference point to the road, colored by status.
#[must_use]
pub fn polyline(config: &Config, status: &str, position: Coordinate) -> PolylineOptions {
    PolylineOptions {
        points: vec![KINGS_CROSS, position],
        color: LineColor::for_status(status),
        width: config.polyline_width,
        idx: 0,
    }
}
