use crate::error::SectorError;
use crate::geo::{Bearing, GeoPoint, destination};

pub const DEFAULT_CIRCLE_STEPS: usize = 64;

/// Closed ring approximating a geodesic circle around `center`, `steps`
/// vertices plus the repeated first one. Vertices run clockwise from north.
pub fn circle_ring(
    center: GeoPoint,
    radius_m: f64,
    steps: usize,
    earth_radius_m: f64,
) -> Result<Vec<GeoPoint>, SectorError> {
    if steps < 3 {
        return Err(SectorError::invalid("steps", steps as f64));
    }
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(SectorError::invalid("radius_m", radius_m));
    }

    let mut ring = (0..steps)
        .map(|i| {
            let bearing = Bearing::from_degrees(360.0 * i as f64 / steps as f64);
            destination(center, radius_m, bearing, earth_radius_m)
        })
        .collect::<Result<Vec<_>, _>>()?;
    ring.push(ring[0]);
    Ok(ring)
}
