use geo::{Coord, Destination, Geodesic, LineString, Point, Polygon};

use crate::common::GeometryError;

pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const DEFAULT_SEGMENTS: usize = 64;
pub const MIN_SEGMENTS: usize = 8;

/// Approximate the geodesic disk of `radius_m` metres around `center` on the
/// WGS84 ellipsoid.
///
/// Vertices are placed at evenly spaced bearings, counter-clockwise, starting
/// due north. Longitudes are kept within 180° of the center so a ring that
/// crosses the antimeridian stays contiguous (it may exceed ±180).
pub fn geodesic_buffer(
    center: Point<f64>,
    radius_m: f64,
    segments: usize,
) -> Result<Polygon<f64>, GeometryError> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(GeometryError::InvalidRadius(radius_m));
    }
    validate_coordinate(center)?;

    let segments = segments.max(MIN_SEGMENTS);
    let step = 360.0 / segments as f64;
    let ring: Vec<Coord<f64>> = (0..segments)
        .map(|i| {
            let bearing = (360.0 - i as f64 * step) % 360.0;
            let vertex = Geodesic::destination(center, bearing, radius_m);
            Coord { x: unwrap_longitude(vertex.x(), center.x()), y: vertex.y() }
        })
        .collect();

    // Polygon::new closes the ring.
    Ok(Polygon::new(LineString::from(ring), vec![]))
}

pub fn validate_coordinate(p: Point<f64>) -> Result<(), GeometryError> {
    let (lng, lat) = (p.x(), p.y());
    if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        return Err(GeometryError::InvalidCoordinate { lat, lng });
    }
    Ok(())
}

fn unwrap_longitude(lng: f64, reference: f64) -> f64 {
    let mut lng = lng;
    while lng - reference > 180.0 {
        lng -= 360.0;
    }
    while lng - reference < -180.0 {
        lng += 360.0;
    }
    lng
}
