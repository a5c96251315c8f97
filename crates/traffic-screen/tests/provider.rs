#![allow(missing_docs)]
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, Request, Response};
use http_body_util::Empty;
use tokio::sync::Notify;
use traffic_screen::{
    CameraPosition, Coordinate, Error, Geolocation, GeolocationOptions, HttpRequest, MapSdk,
    MapView, MarkerHandle, MarkerOptions, PolylineOptions, Provider, Reporter, Ui,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const CLEAR_BODY: &str = r#"{"position":{"lat":1,"lng":2},"status":"Clear","name":"A1"}"#;
pub const CONGESTED_BODY: &str =
    r#"{"position":{"lat":51.5033,"lng":-0.1196},"status":"Congested","name":"A201"}"#;

/// Everything the screen asked of its collaborators, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateMap(String),
    AnimateCamera(CameraPosition),
    AddMarker { id: usize, options: MarkerOptions },
    ShowInfoWindow(usize),
    HideInfoWindow(usize),
    AddPolyline(PolylineOptions),
    Fetch { method: Method, uri: String },
    CurrentPosition(GeolocationOptions),
    Alert(String),
    Loading(bool),
    Report { operation: String, error: Error },
}

/// Canned server behavior for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, &'static str),
    Unreachable(&'static str),
}

#[derive(Default)]
struct Inner {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Reply>>,
    position: Mutex<Option<Coordinate>>,
    gate: Mutex<Option<Arc<Notify>>>,
    map_gate: Mutex<Option<Arc<Notify>>>,
    map_fails: Mutex<bool>,
    polyline_fails: Mutex<bool>,
    markers: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct MockProvider {
    inner: Arc<Inner>,
}

impl MockProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next request. Requests with nothing queued
    /// get a 200 with [`CLEAR_BODY`].
    #[must_use]
    pub fn reply(self, reply: Reply) -> Self {
        self.inner.replies.lock().unwrap().push_back(reply);
        self
    }

    #[must_use]
    pub fn position(self, position: Coordinate) -> Self {
        *self.inner.position.lock().unwrap() = Some(position);
        self
    }

    /// Hold every request until `gate` is notified.
    #[must_use]
    pub fn gate(self, gate: Arc<Notify>) -> Self {
        *self.inner.gate.lock().unwrap() = Some(gate);
        self
    }

    /// Hold map creation until `gate` is notified.
    #[must_use]
    pub fn map_gate(self, gate: Arc<Notify>) -> Self {
        *self.inner.map_gate.lock().unwrap() = Some(gate);
        self
    }

    #[must_use]
    pub fn failing_polyline(self) -> Self {
        *self.inner.polyline_fails.lock().unwrap() = true;
        self
    }

    #[must_use]
    pub fn failing_map(self) -> Self {
        *self.inner.map_fails.lock().unwrap() = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls.lock().unwrap().clone()
    }

    /// Calls that change what is drawn on the map.
    pub fn map_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::AnimateCamera(_)
                        | Call::AddMarker { .. }
                        | Call::ShowInfoWindow(_)
                        | Call::HideInfoWindow(_)
                        | Call::AddPolyline(_)
                )
            })
            .collect()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self) -> Vec<(String, Error)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Report { operation, error } => Some((operation, error)),
                _ => None,
            })
            .collect()
    }

    pub fn polylines(&self) -> Vec<PolylineOptions> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddPolyline(options) => Some(options),
                _ => None,
            })
            .collect()
    }

    pub fn markers(&self) -> Vec<MarkerOptions> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddMarker { options, .. } => Some(options),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.inner.calls.lock().unwrap().push(call);
    }
}

impl Provider for MockProvider {}

impl HttpRequest for MockProvider {
    async fn fetch(&self, request: Request<Empty<Bytes>>) -> Result<Response<Bytes>> {
        self.record(Call::Fetch {
            method: request.method().clone(),
            uri: request.uri().to_string(),
        });

        let gate = self.inner.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let reply = self.inner.replies.lock().unwrap().pop_front();
        match reply.unwrap_or(Reply::Status(200, CLEAR_BODY)) {
            Reply::Status(status, body) => Response::builder()
                .status(status)
                .body(Bytes::from_static(body.as_bytes()))
                .context("failed to build response"),
            Reply::Unreachable(reason) => Err(anyhow!(reason)).context("sending request"),
        }
    }
}

#[async_trait]
impl MapSdk for MockProvider {
    type Map = MockMap;

    async fn create_map(&self, container: &str) -> Result<MockMap> {
        self.record(Call::CreateMap(container.to_string()));

        let gate = self.inner.map_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if *self.inner.map_fails.lock().unwrap() {
            return Err(anyhow!("no element with id {container}"));
        }
        Ok(MockMap { provider: self.clone() })
    }
}

pub struct MockMap {
    provider: MockProvider,
}

impl MapView for MockMap {
    type Marker = MockMarker;

    fn animate_camera(&self, camera: &CameraPosition) -> Result<()> {
        self.provider.record(Call::AnimateCamera(*camera));
        Ok(())
    }

    fn add_marker(&self, options: &MarkerOptions) -> Result<MockMarker> {
        let id = self.provider.inner.markers.fetch_add(1, Ordering::SeqCst);
        self.provider.record(Call::AddMarker { id, options: options.clone() });
        Ok(MockMarker { id, provider: self.provider.clone() })
    }

    fn add_polyline(&self, options: &PolylineOptions) -> Result<()> {
        if *self.provider.inner.polyline_fails.lock().unwrap() {
            return Err(anyhow!("polyline rejected"));
        }
        self.provider.record(Call::AddPolyline(options.clone()));
        Ok(())
    }
}

pub struct MockMarker {
    id: usize,
    provider: MockProvider,
}

impl MarkerHandle for MockMarker {
    fn show_info_window(&self) -> Result<()> {
        self.provider.record(Call::ShowInfoWindow(self.id));
        Ok(())
    }

    fn hide_info_window(&self) -> Result<()> {
        self.provider.record(Call::HideInfoWindow(self.id));
        Ok(())
    }
}

#[async_trait]
impl Geolocation for MockProvider {
    async fn current_position(&self, options: GeolocationOptions) -> Result<Coordinate> {
        self.record(Call::CurrentPosition(options));
        let position = *self.inner.position.lock().unwrap();
        position.ok_or_else(|| anyhow!("position unavailable"))
    }
}

impl Ui for MockProvider {
    fn alert(&self, message: &str) {
        self.record(Call::Alert(message.to_string()));
    }

    fn set_loading(&self, visible: bool) {
        self.record(Call::Loading(visible));
    }
}

impl Reporter for MockProvider {
    fn report(&self, operation: &str, error: &Error) {
        self.record(Call::Report { operation: operation.to_string(), error: error.clone() });
    }
}

/// Install a test subscriber once per test binary.
pub fn init_tracing() {
    let _ = Registry::default()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}
