//! Host implementations of the traffic screen collaborators.
//!
//! HTTP goes over `reqwest`. The map surface is the terminal: every camera
//! move and overlay is printed where a native map would draw it.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Empty;
use tracing::{debug, error, info, warn};
use traffic_screen::{
    CameraPosition, Coordinate, Error, Geolocation, GeolocationOptions, HttpRequest, MapSdk,
    MapView, MarkerHandle, MarkerOptions, PolylineOptions, Reporter, Ui,
};

use crate::config;

#[derive(Clone)]
pub struct Provider {
    client: reqwest::Client,
    device_position: Option<Coordinate>,
}

impl Provider {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build().context("building http client")?;
        Ok(Self { client, device_position: config::get_device_position() })
    }
}

impl traffic_screen::Provider for Provider {}

impl HttpRequest for Provider {
    async fn fetch(&self, request: Request<Empty<Bytes>>) -> Result<Response<Bytes>> {
        let (parts, _body) = request.into_parts();
        debug!(method = %parts.method, uri = %parts.uri, "sending request");

        let response = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .send()
            .await
            .context("sending request")?;

        let status = response.status();
        let body = response.bytes().await.context("reading response body")?;
        Response::builder().status(status).body(body).context("building response")
    }
}

#[async_trait]
impl MapSdk for Provider {
    type Map = ConsoleMap;

    async fn create_map(&self, container: &str) -> Result<ConsoleMap> {
        println!("[map] view created in #{container}");
        Ok(ConsoleMap { markers: AtomicUsize::new(0) })
    }
}

/// Map surface that prints what it would draw.
pub struct ConsoleMap {
    markers: AtomicUsize,
}

impl MapView for ConsoleMap {
    type Marker = ConsoleMarker;

    fn animate_camera(&self, camera: &CameraPosition) -> Result<()> {
        println!(
            "[map] camera -> {} zoom {} tilt {} bearing {} over {}ms",
            camera.target,
            camera.zoom,
            camera.tilt,
            camera.bearing,
            camera.duration.as_millis()
        );
        Ok(())
    }

    fn add_marker(&self, options: &MarkerOptions) -> Result<ConsoleMarker> {
        let id = self.markers.fetch_add(1, Ordering::Relaxed);
        println!("[map] marker #{id} at {} ({:?})", options.position, options.animation);
        Ok(ConsoleMarker {
            id,
            title: options.title.replace('\n', ""),
            snippet: options.snippet.clone(),
        })
    }

    fn add_polyline(&self, options: &PolylineOptions) -> Result<()> {
        let points =
            options.points.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");
        println!("[map] {} line, width {}: {points}", options.color, options.width);
        Ok(())
    }
}

pub struct ConsoleMarker {
    id: usize,
    title: String,
    snippet: String,
}

impl MarkerHandle for ConsoleMarker {
    fn show_info_window(&self) -> Result<()> {
        println!("[map] marker #{} info: {} | {}", self.id, self.title, self.snippet);
        Ok(())
    }

    fn hide_info_window(&self) -> Result<()> {
        println!("[map] marker #{} info hidden", self.id);
        Ok(())
    }
}

#[async_trait]
impl Geolocation for Provider {
    async fn current_position(&self, options: GeolocationOptions) -> Result<Coordinate> {
        debug!(high_accuracy = options.enable_high_accuracy, "requesting device position");
        self.device_position.ok_or_else(|| anyhow!("position unavailable"))
    }
}

impl Ui for Provider {
    fn alert(&self, message: &str) {
        warn!(text = %message, "alert shown");
        println!("[alert] {message}");
    }

    fn set_loading(&self, visible: bool) {
        info!(visible, "loading indicator");
    }
}

impl Reporter for Provider {
    fn report(&self, operation: &str, error: &Error) {
        error!(monotonic_counter.processing_errors = 1, operation = %operation, error = %error);
    }
}
