//! # Provider
//!
//! Provider defines the external collaborators the screen talks to. The host
//! application implements these against the real map SDK, device sensors,
//! and network stack.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Empty;

use crate::Error;
use crate::types::{CameraPosition, Coordinate, GeolocationOptions, MarkerOptions, PolylineOptions};

/// Provider entry point implemented by the host application.
pub trait Provider: HttpRequest + MapSdk + Geolocation + Ui + Reporter {}

/// The `HttpRequest` trait defines the behavior for fetching data from a source.
pub trait HttpRequest: Send + Sync {
    /// Make outbound HTTP request.
    fn fetch(
        &self, request: Request<Empty<Bytes>>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// Map SDK entry point: creates the native map view.
#[async_trait]
pub trait MapSdk: Send + Sync {
    type Map: MapView;

    /// Create a map bound to the named screen region. Resolves once the map
    /// is ready to accept camera moves and overlays.
    async fn create_map(&self, container: &str) -> Result<Self::Map>;
}

/// A live map view.
pub trait MapView: Send + Sync {
    type Marker: MarkerHandle;

    fn animate_camera(&self, camera: &CameraPosition) -> Result<()>;

    /// Add a marker. Dropping the returned handle does not remove the marker
    /// from the map.
    fn add_marker(&self, options: &MarkerOptions) -> Result<Self::Marker>;

    fn add_polyline(&self, options: &PolylineOptions) -> Result<()>;
}

/// Reference to a marker drawn on the map.
pub trait MarkerHandle: Send + Sync {
    fn show_info_window(&self) -> Result<()>;

    fn hide_info_window(&self) -> Result<()>;
}

/// Device position source.
#[async_trait]
pub trait Geolocation: Send + Sync {
    async fn current_position(&self, options: GeolocationOptions) -> Result<Coordinate>;
}

/// User-facing controls around the map.
pub trait Ui: Send + Sync {
    /// Show a blocking alert.
    fn alert(&self, message: &str);

    /// Toggle the loading indicator.
    fn set_loading(&self, visible: bool);
}

/// Sink for failures that are not shown to the user.
pub trait Reporter: Send + Sync {
    fn report(&self, operation: &str, error: &Error);
}
