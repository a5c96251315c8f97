use traffic_screen::Coordinate;

/// Fixed device position for hosts without a location sensor, given as
/// `DEVICE_POSITION="lat,lng"`.
pub fn get_device_position() -> Option<Coordinate> {
    let Ok(value) = std::env::var("DEVICE_POSITION") else {
        tracing::trace!("DEVICE_POSITION not set, geolocation unavailable");
        return None;
    };

    let position = parse_position(&value);
    if position.is_none() {
        tracing::warn!(value = %value, "DEVICE_POSITION is not a `lat,lng` pair");
    }
    position
}

pub fn get_log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

fn parse_position(value: &str) -> Option<Coordinate> {
    let (lat, lng) = value.split_once(',')?;
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lng.trim().parse::<f64>().ok()?;

    ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
        .then_some(Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use traffic_screen::Coordinate;

    use super::parse_position;

    #[test]
    fn device_position() {
        assert_eq!(parse_position("51.5074, -0.1278"), Some(Coordinate::new(51.5074, -0.1278)));
        assert_eq!(parse_position("51.5074"), None);
        assert_eq!(parse_position("north,west"), None);
        assert_eq!(parse_position("91,0"), None);
    }
}
