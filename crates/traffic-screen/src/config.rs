use std::env;
use std::time::Duration;

const DEFAULT_SERVER_URL: &str = "https://ec2-13-59-22-38.us-east-2.compute.amazonaws.com";
const DEFAULT_MAP_CONTAINER: &str = "map_canvas";

/// Screen configuration derived from the host environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server_url: String,
    pub map_container: String,
    pub camera: CameraConfig,
    pub polyline_width: u32,
    pub high_accuracy: bool,
    pub show_loading: bool,
}

/// Fixed camera settings used whenever the map is re-centred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub zoom: f64,
    pub tilt: f64,
    pub bearing: f64,
    pub duration: Duration,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { zoom: 16.0, tilt: 60.0, bearing: 0.0, duration: Duration::from_millis(3000) }
    }
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or unparsable values.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let camera_defaults = CameraConfig::default();
        let f64_or = |key: &str, default: f64| {
            lookup(key).and_then(|value| value.parse::<f64>().ok()).unwrap_or(default)
        };
        let bool_or = |key: &str, default: bool| {
            lookup(key)
                .map(|value| matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(default)
        };

        let server_url = lookup("SERVER_URL").unwrap_or_else(|| {
            tracing::trace!("SERVER_URL not set, using default: {DEFAULT_SERVER_URL}");
            DEFAULT_SERVER_URL.to_string()
        });
        let map_container =
            lookup("MAP_CONTAINER").unwrap_or_else(|| DEFAULT_MAP_CONTAINER.to_string());
        let duration = lookup("CAMERA_DURATION_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .map_or(camera_defaults.duration, Duration::from_millis);
        let polyline_width =
            lookup("POLYLINE_WIDTH").and_then(|value| value.parse::<u32>().ok()).unwrap_or(10);

        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            map_container,
            camera: CameraConfig {
                zoom: f64_or("CAMERA_ZOOM", camera_defaults.zoom),
                tilt: f64_or("CAMERA_TILT", camera_defaults.tilt),
                bearing: f64_or("CAMERA_BEARING", camera_defaults.bearing),
                duration,
            },
            polyline_width,
            high_accuracy: bool_or("HIGH_ACCURACY", true),
            show_loading: bool_or("SHOW_LOADING", true),
        }
    }

    /// URL of the road information endpoint.
    #[must_use]
    pub fn road_information_url(&self) -> String {
        format!("{}/road-information", self.server_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
