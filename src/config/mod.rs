use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::SectorError;
use crate::geo::{GeoPoint, REFERENCE_EARTH_RADIUS_M};
use crate::palette::Palette;
use crate::sector::circle::DEFAULT_CIRCLE_STEPS;
use crate::sector::{DEFAULT_CONE_RADIUS_M, DEFAULT_HALF_APERTURE_DEG};

/// Scene parameters. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorConfig {
    /// Observation point, `[lon, lat]`.
    pub origin: GeoPoint,
    pub earth_radius_m: f64,
    pub cone_radius_m: f64,
    pub half_aperture_deg: f64,
    pub palette: Palette,
    pub sector_opacity: f64,
    pub gimbal_radius_m: f64,
    pub gimbal_steps: usize,
    pub gimbal_color: String,
    pub gimbal_opacity: f64,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            origin: GeoPoint::new(-86.0, 36.0),
            earth_radius_m: REFERENCE_EARTH_RADIUS_M,
            cone_radius_m: DEFAULT_CONE_RADIUS_M,
            half_aperture_deg: DEFAULT_HALF_APERTURE_DEG,
            palette: Palette::default(),
            sector_opacity: 0.8,
            gimbal_radius_m: 1000.0,
            gimbal_steps: DEFAULT_CIRCLE_STEPS,
            gimbal_color: "gray".to_string(),
            gimbal_opacity: 0.2,
        }
    }
}

impl SectorConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let reader = std::io::BufReader::new(file);
        let config: SectorConfig = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SectorError> {
        self.origin.validate()?;
        if !self.earth_radius_m.is_finite() || self.earth_radius_m <= 0.0 {
            return Err(SectorError::invalid("earth_radius_m", self.earth_radius_m));
        }
        if !self.cone_radius_m.is_finite() || self.cone_radius_m <= 0.0 {
            return Err(SectorError::invalid("cone_radius_m", self.cone_radius_m));
        }
        if !self.half_aperture_deg.is_finite() || self.half_aperture_deg < 0.0 {
            return Err(SectorError::invalid("half_aperture_deg", self.half_aperture_deg));
        }
        if !self.gimbal_radius_m.is_finite() || self.gimbal_radius_m <= 0.0 {
            return Err(SectorError::invalid("gimbal_radius_m", self.gimbal_radius_m));
        }
        if self.gimbal_steps < 3 {
            return Err(SectorError::invalid("gimbal_steps", self.gimbal_steps as f64));
        }
        if self.gimbal_color.trim().is_empty() {
            return Err(SectorError::InvalidPalette("empty gimbal color".to_string()));
        }
        for (what, opacity) in [
            ("sector_opacity", self.sector_opacity),
            ("gimbal_opacity", self.gimbal_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(SectorError::invalid(what, opacity));
            }
        }
        Ok(())
    }
}
