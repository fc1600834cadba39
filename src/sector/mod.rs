pub mod circle;

use tracing::debug;

use crate::config::SectorConfig;
use crate::error::SectorError;
use crate::geo::{Bearing, GeoPoint, destination};
use crate::io::SensorReading;
use crate::palette::{Palette, assign_colors};

pub const DEFAULT_CONE_RADIUS_M: f64 = 1000.0;
pub const DEFAULT_HALF_APERTURE_DEG: f64 = 7.0;

/// Closed ring `[origin, left, right, origin]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorRing {
    pub points: [GeoPoint; 4],
}

impl SectorRing {
    pub fn origin(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn left(&self) -> GeoPoint {
        self.points[1]
    }

    pub fn right(&self) -> GeoPoint {
        self.points[2]
    }

    pub fn is_closed(&self) -> bool {
        self.points[0] == self.points[3]
    }
}

/// Sector geometry tagged with the sensor that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorPolygon {
    pub id: String,
    pub color: String,
    pub aoa: f64,
    pub ring: SectorRing,
}

/// Builds the uncertainty cone of a bearing reading.
///
/// `aoa_deg` is the bisector, `aperture_deg` the full width split evenly on
/// both sides. Edge bearings are not normalized: an AOA of 3° with a 14°
/// aperture projects the left edge at -4°.
pub fn build_sector(
    origin: GeoPoint,
    aoa_deg: f64,
    aperture_deg: f64,
    radius_m: f64,
    earth_radius_m: f64,
) -> Result<SectorRing, SectorError> {
    if !aoa_deg.is_finite() {
        return Err(SectorError::invalid("aoa_deg", aoa_deg));
    }
    if !aperture_deg.is_finite() || aperture_deg < 0.0 {
        return Err(SectorError::invalid("aperture_deg", aperture_deg));
    }
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(SectorError::invalid("radius_m", radius_m));
    }

    let half = aperture_deg / 2.0;
    let left = destination(
        origin,
        radius_m,
        Bearing::from_degrees(aoa_deg - half),
        earth_radius_m,
    )?;
    let right = destination(
        origin,
        radius_m,
        Bearing::from_degrees(aoa_deg + half),
        earth_radius_m,
    )?;

    Ok(SectorRing {
        points: [origin, left, right, origin],
    })
}

/// Sector construction bound to one configuration (origin, earth radius,
/// cone defaults).
#[derive(Debug, Clone)]
pub struct SectorBuilder {
    config: SectorConfig,
}

impl SectorBuilder {
    pub fn new(config: SectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SectorConfig {
        &self.config
    }

    pub fn default_aperture_deg(&self) -> f64 {
        self.config.half_aperture_deg * 2.0
    }

    pub fn build_sector(&self, aoa_deg: f64) -> Result<SectorRing, SectorError> {
        self.build_sector_with_aperture(aoa_deg, self.default_aperture_deg())
    }

    pub fn build_sector_with_aperture(
        &self,
        aoa_deg: f64,
        aperture_deg: f64,
    ) -> Result<SectorRing, SectorError> {
        build_sector(
            self.config.origin,
            aoa_deg,
            aperture_deg,
            self.config.cone_radius_m,
            self.config.earth_radius_m,
        )
    }

    /// Colors and projects a whole batch. Any failure discards the batch:
    /// either every reading gets a polygon or the caller gets the error.
    pub fn build_batch(
        &self,
        readings: &[SensorReading],
        palette: &Palette,
    ) -> Result<Vec<SectorPolygon>, SectorError> {
        let sensors = assign_colors(palette, readings)?;

        sensors
            .into_iter()
            .map(|sensor| {
                let aperture = sensor.aperture_deg.unwrap_or(self.default_aperture_deg());
                let ring = self.build_sector_with_aperture(sensor.aoa, aperture)?;
                debug!(
                    "sector {} ({}): aoa {:.6} deg, aperture {:.2} deg",
                    sensor.name, sensor.color, sensor.aoa, aperture
                );
                Ok(SectorPolygon {
                    id: sensor.name,
                    color: sensor.color,
                    aoa: sensor.aoa,
                    ring,
                })
            })
            .collect()
    }
}

impl Default for SectorBuilder {
    fn default() -> Self {
        Self::new(SectorConfig::default())
    }
}
