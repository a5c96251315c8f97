//! Traffic Screen Controller
//!
//! Drives the screen flow: the host signals readiness, the map is created,
//! the camera follows the device, and each click on the traffic control
//! fetches the latest road report and draws it.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::Context;
use bytes::Bytes;
use http::header::ACCEPT;
use http::{Method, StatusCode};
use http_body_util::Empty;
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::error::Error;
use crate::provider::{
    Geolocation, HttpRequest, MapSdk, MapView, MarkerHandle, Provider, Reporter, Ui,
};
use crate::state::Phase;
use crate::types::{Coordinate, FetchOutcome, GeolocationOptions, TrafficReport, UNKNOWN_STATUS};
use crate::{Result, render};

type MarkerOf<P> = <<P as MapSdk>::Map as MapView>::Marker;

struct ScreenState<M> {
    phase: Phase,
    marker: Option<M>,
    traffic_status: String,
    last_report: Option<TrafficReport>,
}

/// Controller for a single traffic screen.
///
/// Methods take `&self` so UI events can arrive while a request is
/// outstanding. Screen state is locked only between suspension points.
pub struct TrafficScreenController<P: Provider> {
    provider: P,
    config: Config,
    map: OnceLock<P::Map>,
    state: Mutex<ScreenState<MarkerOf<P>>>,
}

impl<P: Provider> TrafficScreenController<P> {
    pub fn new(provider: P, config: Config) -> Self {
        Self {
            provider,
            config,
            map: OnceLock::new(),
            state: Mutex::new(ScreenState {
                phase: Phase::Uninitialized,
                marker: None,
                traffic_status: UNKNOWN_STATUS.to_string(),
                last_report: None,
            }),
        }
    }

    /// Create the map view. Called once, when the host signals it is ready.
    ///
    /// Other operations are refused with [`Error::NotReady`] until the map
    /// exists. A failed creation returns the screen to
    /// [`Phase::Uninitialized`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Map`] when the SDK fails to create the map and
    /// [`Error::InvalidTransition`] when the map exists or is being created.
    #[instrument(skip(self), fields(container = %self.config.map_container))]
    pub async fn initialize(&self) -> Result<()> {
        self.state().phase.transition(Phase::Initializing)?;

        let map = match self.provider.create_map(&self.config.map_container).await {
            Ok(map) => map,
            Err(err) => {
                self.state().phase.transition(Phase::Uninitialized)?;
                return Err(map_error("creating map")(err));
            }
        };

        if self.map.set(map).is_err() {
            return Err(Error::InvalidTransition("map already created".to_string()));
        }
        self.state().phase.transition(Phase::MapReady)?;

        info!("map ready");
        Ok(())
    }

    /// Animate the camera to centre on `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before the map exists and [`Error::Map`]
    /// when the map rejects the camera move.
    pub fn locate_on_map(&self, coordinate: Coordinate) -> Result<()> {
        let camera = render::camera(&self.config.camera, coordinate);
        self.map()?.animate_camera(&camera).map_err(map_error("animating camera"))?;

        debug!(position = %coordinate, "camera moved");
        Ok(())
    }

    /// Centre the map on the device's current position.
    ///
    /// A failed position lookup is reported and otherwise dropped, in which
    /// case `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before the map exists and [`Error::Map`]
    /// when the camera move fails.
    #[instrument(skip(self))]
    pub async fn geolocate_device(&self) -> Result<Option<Coordinate>> {
        self.map()?;

        let options = GeolocationOptions { enable_high_accuracy: self.config.high_accuracy };
        match self.provider.current_position(options).await {
            Ok(coordinate) => {
                self.locate_on_map(coordinate)?;
                Ok(Some(coordinate))
            }
            Err(err) => {
                let error = Error::Geolocation(format!("{err:#}"));
                warn!(monotonic_counter.geolocation_errors = 1, error = %error);
                self.provider.report("geolocate_device", &error);
                Ok(None)
            }
        }
    }

    /// Handle a click on the traffic control: fetch the road report and
    /// draw it.
    ///
    /// A click while a previous request is still outstanding is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before the map exists, [`Error::InvalidFormat`]
    /// when the response body is not a traffic report, and [`Error::Map`] when
    /// drawing fails.
    #[instrument(skip(self))]
    pub async fn fetch_traffic_report(&self) -> Result<FetchOutcome> {
        let previous = {
            let mut state = self.state();
            match state.phase {
                Phase::Uninitialized | Phase::Initializing => {
                    return Err(Error::NotReady("map has not been created".to_string()));
                }
                Phase::AwaitingReport => {
                    debug!("request already outstanding, ignoring click");
                    return Ok(FetchOutcome::Ignored);
                }
                phase => {
                    state.phase.transition(Phase::AwaitingReport)?;
                    phase
                }
            }
        };

        if self.config.show_loading {
            self.provider.set_loading(true);
        }

        let outcome = self.request_and_render().await;

        if self.config.show_loading {
            self.provider.set_loading(false);
        }

        let next = match &outcome {
            Ok(FetchOutcome::Rendered(_)) => Phase::ReportRendered,
            _ => previous,
        };
        self.state().phase.transition(next)?;

        outcome
    }

    async fn request_and_render(&self) -> Result<FetchOutcome> {
        let url = self.config.road_information_url();
        let request = http::Request::builder()
            .method(Method::GET)
            .uri(&url)
            .header(ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .context("building road information request")?;

        let response = match self.provider.fetch(request).await {
            Ok(response) => response,
            Err(err) => {
                let error = Error::Transport(format!("{err:#}"));
                error!(monotonic_counter.fetch_errors = 1, error = %error, url = %url);
                self.provider.report("fetch_traffic_report", &error);
                return Ok(FetchOutcome::Unreachable);
            }
        };

        let status = response.status().as_u16();
        if status != StatusCode::OK {
            let error = Error::BadStatus(status);
            warn!(monotonic_counter.rejected_requests = 1, error = %error, url = %url);
            self.provider.alert(&format!(
                "There was an error while fetching the information (status {status})"
            ));
            return Ok(FetchOutcome::Rejected { status });
        }

        let report: TrafficReport = serde_json::from_slice(response.body())?;
        self.render_report(&report)?;

        info!(
            monotonic_counter.reports_rendered = 1,
            status = %report.status,
            road = %report.name,
            position = %report.position
        );
        Ok(FetchOutcome::Rendered(report))
    }

    /// Draw `report`. The screen's status and last report change only once
    /// every map call has succeeded.
    fn render_report(&self, report: &TrafficReport) -> Result<()> {
        let map = self.map()?;
        self.locate_on_map(report.position)?;

        let mut state = self.state();
        if let Some(previous) = &state.marker {
            previous.hide_info_window().map_err(map_error("hiding previous info window"))?;
        }

        let marker = map.add_marker(&render::marker(report)).map_err(map_error("adding marker"))?;
        let marker = state.marker.insert(marker);
        marker.show_info_window().map_err(map_error("showing info window"))?;

        let polyline = render::polyline(&self.config, &report.status, report.position);
        map.add_polyline(&polyline).map_err(map_error("adding polyline"))?;

        state.traffic_status.clone_from(&report.status);
        state.last_report = Some(report.clone());
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    /// Last status received from the server, or [`UNKNOWN_STATUS`].
    pub fn traffic_status(&self) -> String {
        self.state().traffic_status.clone()
    }

    /// Last report drawn on the map.
    pub fn last_report(&self) -> Option<TrafficReport> {
        self.state().last_report.clone()
    }

    fn map(&self) -> Result<&P::Map> {
        self.map.get().ok_or_else(|| Error::NotReady("map has not been created".to_string()))
    }

    fn state(&self) -> MutexGuard<'_, ScreenState<MarkerOf<P>>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn map_error(action: &'static str) -> impl FnOnce(anyhow::Error) -> Error {
    move |err| Error::Map(format!("{action}: {err:#}"))
}
