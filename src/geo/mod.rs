use serde::{Deserialize, Serialize};

use crate::error::SectorError;

/// Earth radius used by the reference sector renderer.
///
/// This does not match any standard ellipsoid (the IUGG mean radius is
/// 6 371 000 m). It is kept so output stays reproducible against the
/// reference polygons; override it through `SectorConfig::earth_radius_m`.
pub const REFERENCE_EARTH_RADIUS_M: f64 = 6_376_500.0;

/// IUGG mean earth radius.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Longitude/latitude pair in degrees. Serialized as `[lon, lat]`, the
/// GeoJSON position order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    pub(crate) fn validate(&self) -> Result<(), SectorError> {
        if !self.longitude.is_finite() {
            return Err(SectorError::invalid("longitude", self.longitude));
        }
        if !self.latitude.is_finite() || self.latitude.abs() > 90.0 {
            return Err(SectorError::invalid("latitude", self.latitude));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self { longitude, latitude }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.longitude, p.latitude]
    }
}

/// Direction clockwise from true north. Stored in radians; only constructed
/// through an explicit unit so callers cannot mix degrees and radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Bearing(f64);

impl Bearing {
    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    pub fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

/// Direct geodesic problem on a sphere: the point reached from `origin` after
/// travelling `distance_m` along `bearing`.
///
/// Negative or > 360° bearings are accepted as-is; the trigonometry is
/// periodic. Accuracy degrades near the antipode (distance -> πR), which is
/// far outside the few-kilometre range this is used for.
pub fn destination(
    origin: GeoPoint,
    distance_m: f64,
    bearing: Bearing,
    earth_radius_m: f64,
) -> Result<GeoPoint, SectorError> {
    origin.validate()?;
    if !distance_m.is_finite() || distance_m < 0.0 {
        return Err(SectorError::invalid("distance_m", distance_m));
    }
    if !bearing.radians().is_finite() {
        return Err(SectorError::invalid("bearing", bearing.radians()));
    }
    if !earth_radius_m.is_finite() || earth_radius_m <= 0.0 {
        return Err(SectorError::invalid("earth_radius_m", earth_radius_m));
    }

    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let theta = bearing.radians();
    let delta = distance_m / earth_radius_m; // angular distance

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    Ok(GeoPoint {
        longitude: lon2.to_degrees(),
        latitude: lat2.to_degrees(),
    })
}

/// Great-circle distance in meters (haversine).
pub fn haversine_distance(p1: GeoPoint, p2: GeoPoint, earth_radius_m: f64) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    earth_radius_m * c
}

/// Initial great-circle bearing from `p1` to `p2`, degrees in [0, 360).
pub fn initial_bearing(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlon = (p2.longitude - p1.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    normalize_bearing_deg(y.atan2(x).to_degrees())
}

/// Wraps any bearing into [0, 360).
pub fn normalize_bearing_deg(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
